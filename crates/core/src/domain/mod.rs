pub mod analysis;
pub mod product;
pub mod report;
pub mod review;
pub mod reviewer;
