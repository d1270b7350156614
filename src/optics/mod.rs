//! Optics: the composable accessor vocabulary under every [`Image`].
//!
//! Three families describe how a part relates to its whole, each with an
//! asynchronous variant whose write direction is deferred to the owning
//! loop:
//!
//! - [`Lens`] / [`AsyncLens`]: get/set access to a sub-part. The setter
//!   rebuilds the whole from the previous whole plus the new part.
//! - [`Iso`] / [`AsyncIso`]: a total two-way transform. The reverse
//!   direction rebuilds the whole from the transformed value alone.
//! - [`Epimorphism`] / [`AsyncEpimorphism`]: a transform whose reverse
//!   direction can fail with a typed error.
//!
//! [`vec`] adds element lenses over vectors ([`find`], [`at`]) and the
//! per-element image combinator [`each`].
//!
//! An [`Image`] consumes these through its derivation methods
//! ([`focus`](crate::image::Image::focus),
//! [`morph`](crate::image::Image::morph),
//! [`parse`](crate::image::Image::parse) and their async counterparts);
//! the optics themselves know nothing about dispatch.
//!
//! # Example
//!
//! ```
//! use imago::lens;
//! use imago::optics::Lens;
//!
//! #[derive(Clone, PartialEq, Debug)]
//! struct Address { street: String, city: String }
//!
//! #[derive(Clone, PartialEq, Debug)]
//! struct Person { name: String, address: Address }
//!
//! let street = lens!(Person, address).compose(lens!(Address, street));
//!
//! let person = Person {
//!     name: "Alice".to_string(),
//!     address: Address {
//!         street: "Main St".to_string(),
//!         city: "Tokyo".to_string(),
//!     },
//! };
//!
//! assert_eq!(street.get(&person), "Main St");
//!
//! let moved = street.set(person, "Oak Ave".to_string());
//! assert_eq!(moved.address.street, "Oak Ave");
//! assert_eq!(moved.address.city, "Tokyo");
//! ```
//!
//! [`Image`]: crate::image::Image

mod epi;
mod iso;
mod lens;
pub mod vec;

pub use lens::AsyncLens;
pub use lens::ComposedLens;
pub use lens::FunctionAsyncLens;
pub use lens::FunctionLens;
pub use lens::Lens;

pub use iso::AsyncIso;
pub use iso::AsyncIsoAsLens;
pub use iso::ComposedIso;
pub use iso::FunctionAsyncIso;
pub use iso::FunctionIso;
pub use iso::Iso;
pub use iso::IsoAsLens;
pub use iso::ReversedIso;

pub use epi::AsyncEpimorphism;
pub use epi::Epimorphism;
pub use epi::FunctionAsyncEpimorphism;
pub use epi::FunctionEpimorphism;

pub use vec::at;
pub use vec::each;
pub use vec::find;
pub use vec::VecAt;
pub use vec::VecFind;
