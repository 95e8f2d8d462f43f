//! Pure debate policies: speaking order and length budgeting.

pub mod length;
pub mod ordering;
