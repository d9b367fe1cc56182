//! In-memory ordered key-value container, implemented as a
//! [Left-Leaning Red-Black][llrb] tree.
//!
//! Every mutation recurses down to the target position and applies a
//! local fix-up on the way back, rebinding each child link to the
//! possibly rotated subtree root. The root is forced black after each
//! mutation.
//!
//! ```
//! use llrb_tree::Llrb;
//!
//! let mut index: Llrb<u64, String> = Llrb::new();
//! index.set(10, "ten".to_string());
//! index.set(20, "twenty".to_string());
//! assert_eq!(index.get(&10), Some("ten".to_string()));
//!
//! assert_eq!(index.delete(&10), Some("ten".to_string()));
//! assert_eq!(index.get(&10), None);
//! assert!(index.validate().is_ok());
//! ```
//!
//! [llrb]: https://sedgewick.io/wp-content/themes/sedgewick/papers/2008LLRB.pdf

mod depth;
mod error;
mod llrb;
mod node;

pub use crate::depth::Depth;
pub use crate::error::LlrbError;
pub use crate::llrb::{Llrb, Stats};

#[cfg(test)]
mod node_test;
