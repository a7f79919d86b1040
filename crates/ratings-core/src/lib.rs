//! Rating evaluation engine.
//!
//! Every function here is a pure function of its inputs. A view is always
//! recomputed from the full normalized row set: validate the selection,
//! filter, search, then order.
//!
//! ```ignore
//! use ratings_core::{SessionState, evaluate, validate_labels};
//!
//! let selection = validate_labels(["Service Connected only", "Static only"])?;
//! let session = SessionState::new().with_selection(selection).with_query("knee");
//! let ranked = evaluate(&rows, &session);
//! ```

pub mod error;
pub mod filter;
pub mod rank;
pub mod selection;
pub mod session;

pub use error::InvalidFilterSelection;
pub use filter::{apply_filters, apply_search, filter_rows, normalize_query};
pub use rank::{apply_ordering, connection_group, rank_default, rank_key, sort_by_column};
pub use selection::{FilterSelection, validate_labels, validate_tokens};
pub use session::{OrderingMode, RankedResult, SessionState, evaluate, evaluate_selection};
