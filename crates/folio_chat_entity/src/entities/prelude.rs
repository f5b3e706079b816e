pub use super::contact::Entity as Contact;
pub use super::conversation_turn::Entity as ConversationTurn;
pub use super::experience::Entity as Experience;
pub use super::introduction::Entity as Introduction;
pub use super::knowledge_entry::Entity as KnowledgeEntry;
pub use super::project::Entity as Project;
pub use super::prompt_example::Entity as PromptExample;
pub use super::skill_category::Entity as SkillCategory;
