pub mod book;
pub mod date;
pub mod isbn;
pub mod series;
pub mod shelf;
