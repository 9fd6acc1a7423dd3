//! Adblock Plus filter list parser
//!
//! Parses filter list text one line at a time into [`Line`] records:
//! headers, comments, metadata, include instructions, blocking filters and
//! element hiding filters. Every parsed record renders back to text that is
//! equal to its input apart from whitespace.
//!
//! # Modules
//!
//! - `types`: parsed record types and their rendering
//! - `parser`: line classification and the per-kind grammars
//! - `list`: lazy iterator over a whole list
//! - `error`: parse errors
//!
//! ```
//! use abp_filters::{parse_line, Line};
//!
//! match parse_line("@@||example.com/good.gif$image").unwrap() {
//!     Line::BlockingFilter(filter) => {
//!         assert!(filter.is_exception);
//!         assert_eq!(filter.pattern, "||example.com/good.gif");
//!     }
//!     other => panic!("unexpected {other:?}"),
//! }
//! ```

pub mod error;
pub mod list;
pub mod parser;
pub mod types;

pub use error::ParseError;
pub use list::{parse_filter_list, FilterList};
pub use parser::parse_line;
pub use types::{
    BlockingFilter, Comment, FilterType, Header, HidingFilter, Include, Line, LineKind, Metadata, OptionValue,
    METADATA_KEYS,
};
