//! Abstract interfaces for dataset elements

pub mod element;

pub use element::Element;
