pub mod catalog;
pub mod favorites;
pub mod images;
pub mod search;
