//! Column tables per document type.
//!
//! Each column names its label and the ordered places its value may come
//! from. The service's field names differ between templates and versions,
//! so a new alias or document type is a table edit here.

use extractor_client::DocumentType;

/// Where a column value may be read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    /// A field read verbatim.
    Field(&'static str),
    /// One comma-separated segment of a combined field such as
    /// `"Jakarta, 01/01/1990"`. A field with no comma is its own segment 0.
    Segment { field: &'static str, index: usize },
}

/// A display column and its alias chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSpec {
    pub label: &'static str,
    pub sources: &'static [Source],
}

use Source::{Field, Segment};

const PLACE_AND_DATE_OF_BIRTH: &str = "Place & Date of Birth";
const TEMPAT_TANGGAL_LAHIR: &str = "Tempat/Tanggal Lahir";

// -----------------------------------------------------------------------------
// Shared columns (English labels)
// -----------------------------------------------------------------------------

const NIK: ColumnSpec = ColumnSpec {
    label: "NIK",
    sources: &[Field("NIK")],
};

const NAME: ColumnSpec = ColumnSpec {
    label: "Name",
    sources: &[Field("Name"), Field("Nama TKA"), Field("Nama")],
};

const GENDER: ColumnSpec = ColumnSpec {
    label: "Gender",
    sources: &[Field("Gender"), Field("Jenis Kelamin")],
};

const PLACE_OF_BIRTH: ColumnSpec = ColumnSpec {
    label: "Place of Birth",
    sources: &[
        Field("Place of Birth"),
        Segment { field: PLACE_AND_DATE_OF_BIRTH, index: 0 },
        Segment { field: TEMPAT_TANGGAL_LAHIR, index: 0 },
        Field("Tempat Lahir"),
    ],
};

const DATE_OF_BIRTH: ColumnSpec = ColumnSpec {
    label: "Date of Birth",
    sources: &[
        Field("Date of Birth"),
        Segment { field: PLACE_AND_DATE_OF_BIRTH, index: 1 },
        Field(TEMPAT_TANGGAL_LAHIR),
    ],
};

const NATIONALITY: ColumnSpec = ColumnSpec {
    label: "Nationality",
    sources: &[Field("Nationality"), Field("Kewarganegaraan")],
};

const OCCUPATION: ColumnSpec = ColumnSpec {
    label: "Occupation",
    sources: &[Field("Occupation"), Field("Pekerjaan")],
};

const ADDRESS: ColumnSpec = ColumnSpec {
    label: "Address",
    sources: &[
        Field("Address"),
        Field("Alamat"),
        Field("Alamat Tempat Tinggal"),
    ],
};

const KITAS_KITAP: ColumnSpec = ColumnSpec {
    label: "KITAS/KITAP",
    sources: &[Field("KITAS/KITAP"), Field("Nomor KITAS/KITAP")],
};

const PASSPORT_NUMBER: ColumnSpec = ColumnSpec {
    label: "Passport Number",
    sources: &[
        Field("Passport Number"),
        Field("Passport No"),
        Field("Nomor Paspor"),
    ],
};

const PASSPORT_EXPIRY: ColumnSpec = ColumnSpec {
    label: "Passport Expiry",
    sources: &[Field("Passport Expiry")],
};

const DATE_ISSUE: ColumnSpec = ColumnSpec {
    label: "Date Issue",
    sources: &[Field("Date Issue"), Field("Tanggal Terbit")],
};

const PERMIT_NUMBER: ColumnSpec = ColumnSpec {
    label: "Permit Number",
    sources: &[Field("Permit Number")],
};

const STAY_PERMIT_EXPIRY: ColumnSpec = ColumnSpec {
    label: "Stay Permit Expiry",
    sources: &[Field("Stay Permit Expiry")],
};

const GUARANTOR: ColumnSpec = ColumnSpec {
    label: "Guarantor",
    sources: &[Field("Guarantor"), Field("Penjamin")],
};

const DECISION_NUMBER: ColumnSpec = ColumnSpec {
    label: "Decision Number",
    sources: &[Field("Decision Number"), Field("Nomor Keputusan")],
};

const POSITION: ColumnSpec = ColumnSpec {
    label: "Position",
    sources: &[Field("Position"), Field("Jabatan")],
};

const WORK_LOCATION: ColumnSpec = ColumnSpec {
    label: "Work Location",
    sources: &[Field("Work Location"), Field("Lokasi Kerja")],
};

const VALIDITY: ColumnSpec = ColumnSpec {
    label: "Validity",
    sources: &[Field("Validity"), Field("Berlaku")],
};

/// Leading export column naming the document type of each row.
pub const DOCUMENT_TYPE: ColumnSpec = ColumnSpec {
    label: "Document Type",
    sources: &[Field("Jenis Dokumen"), Field("Document Type")],
};

// -----------------------------------------------------------------------------
// Per-type lists
// -----------------------------------------------------------------------------

const SKTT_COLUMNS: &[ColumnSpec] = &[
    NIK,
    NAME,
    GENDER,
    PLACE_OF_BIRTH,
    DATE_OF_BIRTH,
    NATIONALITY,
    OCCUPATION,
    ADDRESS,
    KITAS_KITAP,
    PASSPORT_EXPIRY,
    DATE_ISSUE,
];

const EVLN_COLUMNS: &[ColumnSpec] = &[
    NAME,
    PLACE_OF_BIRTH,
    DATE_OF_BIRTH,
    PASSPORT_NUMBER,
    PASSPORT_EXPIRY,
    DATE_ISSUE,
];

/// ITAS and ITK share one template.
const STAY_PERMIT_COLUMNS: &[ColumnSpec] = &[
    NAME,
    PERMIT_NUMBER,
    STAY_PERMIT_EXPIRY,
    PLACE_OF_BIRTH,
    DATE_OF_BIRTH,
    PASSPORT_NUMBER,
    PASSPORT_EXPIRY,
    NATIONALITY,
    GENDER,
    ADDRESS,
    OCCUPATION,
    GUARANTOR,
    DATE_ISSUE,
];

const NOTIFIKASI_COLUMNS: &[ColumnSpec] = &[
    DECISION_NUMBER,
    NAME,
    PLACE_OF_BIRTH,
    DATE_OF_BIRTH,
    NATIONALITY,
    ADDRESS,
    PASSPORT_NUMBER,
    POSITION,
    WORK_LOCATION,
    VALIDITY,
    DATE_ISSUE,
];

/// DKPTKA keeps its own Indonesian labels; none overlap the other lists.
const DKPTKA_COLUMNS: &[ColumnSpec] = &[
    ColumnSpec {
        label: "Nomor Keputusan",
        sources: &[Field("Nomor Keputusan"), Field("Decision Number")],
    },
    ColumnSpec {
        label: "Nama TKA",
        sources: &[Field("Nama TKA"), Field("Name")],
    },
    ColumnSpec {
        label: "Tempat Lahir",
        sources: &[
            Field("Tempat Lahir"),
            Segment { field: TEMPAT_TANGGAL_LAHIR, index: 0 },
            Field("Place of Birth"),
        ],
    },
    ColumnSpec {
        label: "Tanggal Lahir",
        sources: &[
            Field("Tanggal Lahir"),
            Segment { field: TEMPAT_TANGGAL_LAHIR, index: 1 },
            Field("Date of Birth"),
        ],
    },
    ColumnSpec {
        label: "Kewarganegaraan",
        sources: &[Field("Kewarganegaraan"), Field("Nationality")],
    },
    ColumnSpec {
        label: "Alamat Tempat Tinggal",
        sources: &[Field("Alamat Tempat Tinggal"), Field("Address")],
    },
    ColumnSpec {
        label: "Nomor Paspor",
        sources: &[Field("Nomor Paspor"), Field("Passport Number")],
    },
    ColumnSpec {
        label: "Jabatan",
        sources: &[Field("Jabatan"), Field("Position")],
    },
    ColumnSpec {
        label: "Lokasi Kerja",
        sources: &[Field("Lokasi Kerja"), Field("Work Location")],
    },
    ColumnSpec {
        label: "Berlaku",
        sources: &[Field("Berlaku"), Field("Validity")],
    },
    ColumnSpec {
        label: "Tanggal Terbit",
        sources: &[Field("Tanggal Terbit"), Field("Date Issue")],
    },
];

/// Used when a tag names no known document type.
pub const GENERIC_COLUMNS: &[ColumnSpec] = &[
    NAME,
    PLACE_OF_BIRTH,
    DATE_OF_BIRTH,
    PASSPORT_NUMBER,
    PASSPORT_EXPIRY,
    NATIONALITY,
    DATE_ISSUE,
];

/// Column table for `doc_type`.
pub fn column_specs(doc_type: DocumentType) -> &'static [ColumnSpec] {
    match doc_type {
        DocumentType::Sktt => SKTT_COLUMNS,
        DocumentType::Evln => EVLN_COLUMNS,
        DocumentType::Itas | DocumentType::Itk => STAY_PERMIT_COLUMNS,
        DocumentType::Notifikasi => NOTIFIKASI_COLUMNS,
        DocumentType::Dkptka => DKPTKA_COLUMNS,
    }
}

/// Column table for a free-form tag, falling back to [`GENERIC_COLUMNS`].
pub fn column_specs_for_tag(tag: &str) -> &'static [ColumnSpec] {
    tag.parse::<DocumentType>()
        .map(column_specs)
        .unwrap_or(GENERIC_COLUMNS)
}
