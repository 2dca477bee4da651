//! ClipTrim Library
//!
//! Everything between the editor state and the disk:
//!
//! ```text
//! CropSession ──submit──► ClipGateway (ffmpeg / passthrough)
//!      │                         │ ClipHandle
//!      ▼                         ▼
//!  ClipQueries ◄──────── insert_clip(ClipRecord)
//!      │  optimistic delete / replace, versioned refresh
//!      ▼
//!  ClipStore (JSON file under the data dir)
//! ```

pub mod cache;
pub mod library;
pub mod optimistic;
pub mod store;
pub mod workflow;

pub use cache::{ClipQueries, FetchStatus, PendingMutation, QueryKey};
pub use library::ClipLibrary;
pub use optimistic::{ClipView, Mutation};
pub use store::{ClipStore, JsonClipStore, MemoryClipStore};
pub use workflow::{edit_clip, CropSession};
