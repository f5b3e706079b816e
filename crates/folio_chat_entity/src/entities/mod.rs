pub mod prelude;

pub mod contact;
pub mod conversation_turn;
pub mod experience;
pub mod introduction;
pub mod knowledge_entry;
pub mod project;
pub mod prompt_example;
pub mod skill_category;
