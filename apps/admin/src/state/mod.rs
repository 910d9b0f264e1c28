//! # State Module
//!
//! The single state container of the admin client, and the context object
//! every command receives.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                      AppContext                                 │   │
//! │  │  store     : Store          (Arc<Mutex<RootState>>)             │   │
//! │  │  services  : Services       (shared ApiClient)                  │   │
//! │  │  session   : SessionContext (shared with the ApiClient)         │   │
//! │  │  navigator : Arc<dyn Navigator>                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                              │ dispatch(action)                         │
//! │                              ▼                                          │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │  RootState                                                      │   │
//! │  │  products  categories  vouchers  branches  suppliers            │   │
//! │  │  stock     auth                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • Every dispatch takes the store lock exclusively, so updates are     │
//! │    applied one at a time in arrival order.                             │
//! │  • The lock is never held across an await.                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod context;
pub mod store;

pub use context::AppContext;
pub use store::{Action, RootState, Store};
