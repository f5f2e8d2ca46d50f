//! Text analysis: contacts, names, skills, experience, and the batch screener

pub mod document;
pub mod contact;
pub mod name;
pub mod skills;
pub mod experience;
pub mod screener;
