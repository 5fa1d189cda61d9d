//! `hershey-text-fonts` decodes Hershey stroke fonts in the JHF text format
//! into [FontTable]s for the `hershey-text` crate.
//!
//! Fonts can come from three places:
//! - the built-in set, see [FontTable::built_in] and [available_built_in_names]
//! - a `.jhf` file, see [FontTable::from_file]
//! - lines already in memory, see [FontTable::from_lines]
//!
//! It bundles the Hershey font data as redistributed in the JHF format by
//! [Paul Bourke's compilation](https://paulbourke.net/dataformats/hershey/).

mod builtin;
pub mod decode;
mod table;

pub use builtin::available_built_in_names;
pub use decode::{DecodeOptions, LineIssue, parse_glyph_line};
pub use table::FontTable;
