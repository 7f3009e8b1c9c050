//! # VectorMD Sectionizer
//!
//! Splits one markdown document into heading-delimited sections.
//!
//! ## Pipeline
//!
//! ```text
//! Markdown
//!     │
//!     ├──> Fence masking
//!     │      └─> ``` blocks swapped for placeholder tokens
//!     │
//!     ├──> Heading split (`^#+ `)
//!     │      └─> heading / body pieces
//!     │
//!     └──> Restore + pair
//!            └─> Section[]
//! ```
//!
//! ## Example
//!
//! ```
//! use vectormd_sectionizer::sectionize;
//!
//! let sections = sectionize("# A\ncode\n# B\nmore");
//! assert_eq!(sections.len(), 2);
//! assert_eq!(sections[0].heading, "# A");
//! assert_eq!(sections[1].content, "more");
//! ```

mod fence;
mod section;
mod split;

pub use section::Section;
pub use split::sectionize;
