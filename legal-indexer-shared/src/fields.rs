//! Metadata field names.
//!
//! The upstream collection keys its metadata with the Indonesian labels shown
//! on the source registry, so these constants are used verbatim.

/// Document type, e.g. "Peraturan Perundang-undangan".
pub const TIPE_DOKUMEN: &str = "Tipe Dokumen";
/// Title of the regulation.
pub const JUDUL: &str = "Judul";
/// Uniform title (Tajuk Entri Utama).
pub const TEU: &str = "T.E.U.";
/// Regulation number.
pub const NOMOR: &str = "Nomor";
/// Regulation form, e.g. "Undang-undang".
pub const BENTUK: &str = "Bentuk";
/// Short form code, e.g. "UU".
pub const BENTUK_SINGKAT: &str = "Bentuk Singkat";
/// Year of the regulation.
pub const TAHUN: &str = "Tahun";
pub const TEMPAT_PENETAPAN: &str = "Tempat Penetapan";
/// Enactment date.
pub const TANGGAL_PENETAPAN: &str = "Tanggal Penetapan";
/// Promulgation date.
pub const TANGGAL_PENGUNDANGAN: &str = "Tanggal Pengundangan";
/// Effective date.
pub const TANGGAL_BERLAKU: &str = "Tanggal Berlaku";
pub const SUMBER: &str = "Sumber";
pub const SUBJEK: &str = "Subjek";
pub const STATUS: &str = "Status";
pub const BAHASA: &str = "Bahasa";
pub const LOKASI: &str = "Lokasi";
pub const BIDANG: &str = "Bidang";

/// Metadata fields holding free-text Indonesian dates.
pub const DATE_FIELDS: [&str; 3] = [TANGGAL_PENETAPAN, TANGGAL_PENGUNDANGAN, TANGGAL_BERLAKU];

/// Metadata fields indexed as exact-match keywords.
pub const KEYWORD_FIELDS: [&str; 11] = [
    TIPE_DOKUMEN,
    NOMOR,
    BENTUK,
    BENTUK_SINGKAT,
    TAHUN,
    TEMPAT_PENETAPAN,
    SUBJEK,
    STATUS,
    BAHASA,
    LOKASI,
    BIDANG,
];
