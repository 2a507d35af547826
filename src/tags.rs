//! Tag dictionaries.
//!
//! Static lookup tables mapping well-known EXIF tags and IPTC datasets to
//! their wire type. `add` resolves the expected [`TypeTag`] for a key here
//! before parsing the caller's text; XMP needs no table because XMP values
//! are stored textually under their key path.

use crate::types::TypeTag;

/// IFD a tag lives in, named after its key group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IfdId {
    /// IFD0, key group `Image`.
    Image,
    /// Exif IFD, key group `Photo`.
    Photo,
    /// GPS IFD, key group `GPSInfo`.
    GpsInfo,
    /// IFD1, key group `Thumbnail`.
    Thumbnail,
}

impl IfdId {
    fn from_group(group: &str) -> Option<Self> {
        match group {
            "Image" => Some(IfdId::Image),
            "Photo" => Some(IfdId::Photo),
            "GPSInfo" => Some(IfdId::GpsInfo),
            "Thumbnail" => Some(IfdId::Thumbnail),
            _ => None,
        }
    }
}

/// One EXIF tag definition: (tag number, name, IFD, default wire type).
type ExifTagDef = (u16, &'static str, IfdId, TypeTag);

#[rustfmt::skip]
static EXIF_TAGS: &[ExifTagDef] = &[
    // IFD0
    (0x0100, "ImageWidth",        IfdId::Image,   TypeTag::UnsignedLong),
    (0x0101, "ImageLength",       IfdId::Image,   TypeTag::UnsignedLong),
    (0x010E, "ImageDescription",  IfdId::Image,   TypeTag::AsciiString),
    (0x010F, "Make",              IfdId::Image,   TypeTag::AsciiString),
    (0x0110, "Model",             IfdId::Image,   TypeTag::AsciiString),
    (0x0112, "Orientation",       IfdId::Image,   TypeTag::UnsignedShort),
    (0x011A, "XResolution",       IfdId::Image,   TypeTag::UnsignedRational),
    (0x011B, "YResolution",       IfdId::Image,   TypeTag::UnsignedRational),
    (0x0128, "ResolutionUnit",    IfdId::Image,   TypeTag::UnsignedShort),
    (0x0131, "Software",          IfdId::Image,   TypeTag::AsciiString),
    (0x0132, "DateTime",          IfdId::Image,   TypeTag::AsciiString),
    (0x013B, "Artist",            IfdId::Image,   TypeTag::AsciiString),
    (0x8298, "Copyright",         IfdId::Image,   TypeTag::AsciiString),
    (0x8769, "ExifTag",           IfdId::Image,   TypeTag::TiffIfd),
    // Exif IFD
    (0x829A, "ExposureTime",      IfdId::Photo,   TypeTag::UnsignedRational),
    (0x829D, "FNumber",           IfdId::Photo,   TypeTag::UnsignedRational),
    (0x8827, "ISOSpeedRatings",   IfdId::Photo,   TypeTag::UnsignedShort),
    (0x9003, "DateTimeOriginal",  IfdId::Photo,   TypeTag::AsciiString),
    (0x9004, "DateTimeDigitized", IfdId::Photo,   TypeTag::AsciiString),
    (0x9201, "ShutterSpeedValue", IfdId::Photo,   TypeTag::SignedRational),
    (0x9202, "ApertureValue",     IfdId::Photo,   TypeTag::UnsignedRational),
    (0x9204, "ExposureBiasValue", IfdId::Photo,   TypeTag::SignedRational),
    (0x9207, "MeteringMode",      IfdId::Photo,   TypeTag::UnsignedShort),
    (0x920A, "FocalLength",       IfdId::Photo,   TypeTag::UnsignedRational),
    (0x9286, "UserComment",       IfdId::Photo,   TypeTag::Undefined),
    (0xA002, "PixelXDimension",   IfdId::Photo,   TypeTag::UnsignedLong),
    (0xA003, "PixelYDimension",   IfdId::Photo,   TypeTag::UnsignedLong),
    (0xA433, "LensMake",          IfdId::Photo,   TypeTag::AsciiString),
    (0xA434, "LensModel",         IfdId::Photo,   TypeTag::AsciiString),
    // GPS IFD
    (0x0000, "GPSVersionID",      IfdId::GpsInfo, TypeTag::UnsignedByte),
    (0x0001, "GPSLatitudeRef",    IfdId::GpsInfo, TypeTag::AsciiString),
    (0x0002, "GPSLatitude",       IfdId::GpsInfo, TypeTag::UnsignedRational),
    (0x0003, "GPSLongitudeRef",   IfdId::GpsInfo, TypeTag::AsciiString),
    (0x0004, "GPSLongitude",      IfdId::GpsInfo, TypeTag::UnsignedRational),
    (0x0005, "GPSAltitudeRef",    IfdId::GpsInfo, TypeTag::UnsignedByte),
    (0x0006, "GPSAltitude",       IfdId::GpsInfo, TypeTag::UnsignedRational),
    // IFD1
    (0x0201, "JPEGInterchangeFormat",       IfdId::Thumbnail, TypeTag::UnsignedLong),
    (0x0202, "JPEGInterchangeFormatLength", IfdId::Thumbnail, TypeTag::UnsignedLong),
];

/// One IPTC dataset definition:
/// (record number, record name, dataset number, name, type, repeatable).
type IptcDatasetDef = (u8, &'static str, u8, &'static str, TypeTag, bool);

#[rustfmt::skip]
static IPTC_DATASETS: &[IptcDatasetDef] = &[
    // Envelope record
    (1, "Envelope",     0,   "ModelVersion",  TypeTag::UnsignedShort, false),
    (1, "Envelope",     5,   "Destination",   TypeTag::IptcString,    true),
    (1, "Envelope",     20,  "FileFormat",    TypeTag::UnsignedShort, false),
    (1, "Envelope",     30,  "ServiceId",     TypeTag::IptcString,    false),
    (1, "Envelope",     70,  "DateSent",      TypeTag::Date,          false),
    (1, "Envelope",     80,  "TimeSent",      TypeTag::Time,          false),
    (1, "Envelope",     90,  "CharacterSet",  TypeTag::IptcString,    false),
    // Application record
    (2, "Application2", 0,   "RecordVersion", TypeTag::UnsignedShort, false),
    (2, "Application2", 5,   "ObjectName",    TypeTag::IptcString,    false),
    (2, "Application2", 10,  "Urgency",       TypeTag::IptcString,    false),
    (2, "Application2", 15,  "Category",      TypeTag::IptcString,    false),
    (2, "Application2", 20,  "SuppCategory",  TypeTag::IptcString,    true),
    (2, "Application2", 25,  "Keywords",      TypeTag::IptcString,    true),
    (2, "Application2", 55,  "DateCreated",   TypeTag::Date,          false),
    (2, "Application2", 60,  "TimeCreated",   TypeTag::Time,          false),
    (2, "Application2", 80,  "Byline",        TypeTag::IptcString,    true),
    (2, "Application2", 85,  "BylineTitle",   TypeTag::IptcString,    true),
    (2, "Application2", 90,  "City",          TypeTag::IptcString,    false),
    (2, "Application2", 95,  "ProvinceState", TypeTag::IptcString,    false),
    (2, "Application2", 101, "CountryName",   TypeTag::IptcString,    false),
    (2, "Application2", 105, "Headline",      TypeTag::IptcString,    false),
    (2, "Application2", 110, "Credit",        TypeTag::IptcString,    false),
    (2, "Application2", 115, "Source",        TypeTag::IptcString,    false),
    (2, "Application2", 116, "Copyright",     TypeTag::IptcString,    false),
    (2, "Application2", 120, "Caption",       TypeTag::IptcString,    false),
    (2, "Application2", 122, "Writer",        TypeTag::IptcString,    true),
];

/// Resolved EXIF tag: number, IFD and default type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExifTag {
    pub tag: u16,
    pub ifd: IfdId,
    pub default_type: TypeTag,
}

/// Resolved IPTC dataset: record/dataset numbers, type and repeatability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IptcDataset {
    pub record: u8,
    pub dataset: u8,
    pub value_type: TypeTag,
    pub repeatable: bool,
}

/// Looks up an EXIF tag by its key group and name.
pub fn exif_tag(group: &str, name: &str) -> Option<ExifTag> {
    let ifd = IfdId::from_group(group)?;
    EXIF_TAGS
        .iter()
        .find(|&&(_, n, i, _)| i == ifd && n == name)
        .map(|&(tag, _, ifd, default_type)| ExifTag { tag, ifd, default_type })
}

/// Default wire type of an EXIF tag number within an IFD.
pub fn exif_default_type(tag: u16, ifd: IfdId) -> Option<TypeTag> {
    EXIF_TAGS
        .iter()
        .find(|&&(t, _, i, _)| t == tag && i == ifd)
        .map(|&(_, _, _, ty)| ty)
}

/// Looks up an IPTC dataset by its record name and dataset name.
pub fn iptc_dataset(record: &str, name: &str) -> Option<IptcDataset> {
    IPTC_DATASETS
        .iter()
        .find(|&&(_, r, _, n, _, _)| r == record && n == name)
        .map(|&(record, _, dataset, _, value_type, repeatable)| IptcDataset {
            record,
            dataset,
            value_type,
            repeatable,
        })
}

/// Wire type of an IPTC dataset number within a record.
pub fn iptc_dataset_type(dataset: u8, record: u8) -> Option<TypeTag> {
    IPTC_DATASETS
        .iter()
        .find(|&&(r, _, d, _, _, _)| r == record && d == dataset)
        .map(|&(_, _, _, _, ty, _)| ty)
}
