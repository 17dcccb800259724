//! User repository providers
//!
//! | Provider | Registry name | Backing store |
//! |----------|---------------|---------------|
//! | [`InMemoryUserRepository`] | `memory` | Concurrent hash map |
//! | [`RemoteUserRepository`] | `remote` | Document store over HTTP/JSON |

pub mod in_memory;
pub mod remote;

pub use in_memory::InMemoryUserRepository;
pub use remote::RemoteUserRepository;
