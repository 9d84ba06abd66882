//! defines macro
//!
//! # getter!
//! getter that return a reference
//! ## Examples
//! ```ignore
//! struct a {b: usize}
//! impl a {
//!     getter!(pub, b, usize);
//! }
//! ```
//! ```ignore
//! struct a {b: usize}
//! impl a {
//!     getter!(pub const, b, usize);
//! }
//! ```
//! # getter_copy!
//! create a getter that copy the value.
//! ## Examples
//! ```ignore
//! struct a {b: usize}
//! impl a {
//!     getter_copy!(pub, b, usize);
//! }
//! ```

macro_rules! getter {
    ($(#[$meta:meta])* $v:vis, $i:ident, $t:ty) => {
        $(#[$meta])*
        $v fn $i(&self) -> &$t {
            &self.$i
        }
    };
    ($(#[$meta:meta])* $v:vis const, $i:ident, $t:ty) => {
        $(#[$meta])*
        $v const fn $i(&self) -> &$t {
            &self.$i
        }
    }
}

macro_rules! getter_copy {
    ($(#[$meta:meta])* $v:vis, $i:ident, $t:ty) => {
        $(#[$meta])*
        $v fn $i(&self) -> $t {
            self.$i
        }
    };
    ($(#[$meta:meta])* $v:vis const, $i:ident, $t:ty) => {
        $(#[$meta])*
        $v const fn $i(&self) -> $t {
            self.$i
        }
    }
}
