pub mod annotate;
pub mod errors;
pub mod hierarchy;
pub mod model;
pub mod parser;
pub mod ports;
pub mod sanitize;
pub mod tag_name;
pub mod writer;

pub use annotate::{annotate_document, InstanceCounter};
pub use errors::{SnapshotError, SnapshotResult};
pub use hierarchy::{format_xml_input, XmlHierarchy};
pub use model::{Document, Locator, Node, CLASS_ATTRIBUTE, INSTANCE_ATTRIBUTE};
pub use ports::{RawSnapshotSource, StaticSource};
pub use sanitize::{safe_char_seq_to_string, sanitize};
pub use tag_name::{clean_tag_name, DEFAULT_VIEW_NAME};
