//! 提示词拼装
//!
//! 把四类内容源（自我介绍、知识条目、项目、工作经历）和同会话的
//! 最近历史拼成一段系统提示词，顺序固定。拼装本身不产生任何写入。

use folio_chat_entity::{experience, introduction, knowledge_entry, project};

use super::session::HistoryTurn;

/// 问题长度上限（字符数）
pub const MAX_QUESTION_LEN: usize = 1000;

/// 提示词的只读内容源
#[derive(Debug, Default)]
pub struct PromptSources {
    pub introduction: Option<introduction::Model>,
    pub knowledge: Vec<knowledge_entry::Model>,
    pub projects: Vec<project::Model>,
    pub experiences: Vec<experience::Model>,
}

/// 校验用户问题，返回 Err 时附带对外的错误说明
pub fn validate_question(question: &str) -> Result<(), String> {
    let trimmed = question.trim();
    if trimmed.is_empty() {
        return Err("question 不能为空".to_string());
    }
    if trimmed.chars().count() > MAX_QUESTION_LEN {
        return Err(format!("question 超过 {} 字符上限", MAX_QUESTION_LEN));
    }
    Ok(())
}

/// 按固定顺序拼装系统提示词
///
/// 顺序：人设前言 → 自我介绍 → 生效的知识条目 → 全部项目 → 全部经历 → 历史问答。
/// is_active = false 的知识条目在这里被过滤掉，绝不会进入提示词。
pub fn build_system_prompt(sources: &PromptSources, history: &[HistoryTurn]) -> String {
    let mut prompt = String::new();

    prompt.push_str(
        "You are the owner of this portfolio website. Answer every question in the first person, \
         as yourself, based only on the information below. Keep answers concise and friendly. \
         If the information below does not cover the question, say so honestly instead of inventing facts.\n\n",
    );

    if let Some(intro) = &sources.introduction {
        prompt.push_str("## About me\n");
        prompt.push_str(&format!(
            "Name: {}\nTitle: {}\nLocation: {}\nExperience: {}\nTechnologies: {}\n{}\n\n",
            intro.name, intro.title, intro.location, intro.experience, intro.technologies, intro.content
        ));
    }

    let active_knowledge: Vec<_> = sources.knowledge.iter().filter(|entry| entry.is_active).collect();
    if !active_knowledge.is_empty() {
        prompt.push_str("## Things to know about me\n");
        for entry in active_knowledge {
            prompt.push_str(&format!("- {}\n", entry.content));
        }
        prompt.push('\n');
    }

    if !sources.projects.is_empty() {
        prompt.push_str("## My projects\n");
        for project in &sources.projects {
            prompt.push_str(&format!(
                "### {} ({})\n{}\n{}\n",
                project.title, project.period, project.subtitle, project.summary
            ));
            for line in project.content_lines() {
                prompt.push_str(&format!("- {}\n", line));
            }
            prompt.push_str(&format!("Tech: {}\n", project.tech));
            if let Some(link) = &project.more_link {
                prompt.push_str(&format!("Link: {}\n", link));
            }
            if let Some(detail) = &project.detailed_content {
                prompt.push_str(&format!("More detail: {}\n", detail));
            }
            prompt.push('\n');
        }
    }

    if !sources.experiences.is_empty() {
        prompt.push_str("## My work experience\n");
        for exp in &sources.experiences {
            prompt.push_str(&format!(
                "### {} at {} ({}, {})\n",
                exp.position, exp.company, exp.period, exp.location
            ));
            if let Some(description) = &exp.description {
                prompt.push_str(&format!("{}\n", description));
            }
            for line in exp.responsibility_lines() {
                prompt.push_str(&format!("- {}\n", line));
            }
            if let Some(skills) = &exp.skills {
                prompt.push_str(&format!("Skills: {}\n", skills));
            }
            if let Some(website) = &exp.website {
                prompt.push_str(&format!("Website: {}\n", website));
            }
            if let Some(detail) = &exp.detailed_content {
                prompt.push_str(&format!("More detail: {}\n", detail));
            }
            prompt.push('\n');
        }
    }

    if !history.is_empty() {
        prompt.push_str("## Recent conversation\n");
        for turn in history {
            prompt.push_str(&format!("Q: {}\nA: {}\n", turn.question, turn.answer));
        }
        prompt.push('\n');
    }

    prompt
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn knowledge(id: i32, content: &str, is_active: bool) -> knowledge_entry::Model {
        knowledge_entry::Model {
            id,
            content: content.to_string(),
            is_active,
            created_at: "2026-08-30 10:00:00".to_string(),
        }
    }

    fn sample_project() -> project::Model {
        project::Model {
            id: 1,
            title: "Portfolio Site".to_string(),
            period: "2025".to_string(),
            subtitle: "Personal website".to_string(),
            summary: "A portfolio with an AI chat agent".to_string(),
            contents: r#"["Built the chat flow", "Deployed on a VPS"]"#.to_string(),
            tech: "Rust, Axum".to_string(),
            image: "portfolio.png".to_string(),
            more_link: Some("https://example.com".to_string()),
            width: "full".to_string(),
            detailed_content: None,
            display_order: 0,
        }
    }

    #[test]
    fn test_validate_question_rejects_empty() {
        assert_matches!(validate_question(""), Err(_));
        assert_matches!(validate_question("   "), Err(_));
        assert_matches!(validate_question("hello"), Ok(()));
    }

    #[test]
    fn test_validate_question_rejects_oversized() {
        let long = "あ".repeat(MAX_QUESTION_LEN + 1);
        assert_matches!(validate_question(&long), Err(_));
        let just_fits = "a".repeat(MAX_QUESTION_LEN);
        assert_matches!(validate_question(&just_fits), Ok(()));
    }

    #[test]
    fn test_inactive_knowledge_never_appears() {
        let sources = PromptSources {
            knowledge: vec![
                knowledge(1, "likes rust", true),
                knowledge(2, "secret draft entry", false),
            ],
            ..Default::default()
        };
        let prompt = build_system_prompt(&sources, &[]);
        assert!(prompt.contains("likes rust"));
        assert!(!prompt.contains("secret draft entry"));
    }

    #[test]
    fn test_toggling_knowledge_active_makes_it_appear() {
        let mut entry = knowledge(1, "now public", false);
        let sources = PromptSources {
            knowledge: vec![entry.clone()],
            ..Default::default()
        };
        assert!(!build_system_prompt(&sources, &[]).contains("now public"));

        entry.is_active = true;
        let sources = PromptSources {
            knowledge: vec![entry],
            ..Default::default()
        };
        assert!(build_system_prompt(&sources, &[]).contains("now public"));
    }

    #[test]
    fn test_sections_keep_fixed_order() {
        let sources = PromptSources {
            introduction: Some(introduction::Model {
                id: 1,
                name: "Dev".to_string(),
                title: "Engineer".to_string(),
                location: "Seoul".to_string(),
                experience: "5 years".to_string(),
                technologies: "Rust".to_string(),
                content: "I build things".to_string(),
                created_at: "2026-08-30 10:00:00".to_string(),
            }),
            knowledge: vec![knowledge(1, "likes coffee", true)],
            projects: vec![sample_project()],
            experiences: vec![experience::Model {
                id: 1,
                company: "Acme".to_string(),
                position: "Engineer".to_string(),
                period: "2023-2025".to_string(),
                location: "Remote".to_string(),
                description: None,
                responsibilities: None,
                skills: None,
                website: None,
                detailed_content: None,
                display_order: 0,
            }],
        };
        let history = vec![HistoryTurn {
            question: "hi".to_string(),
            answer: "hello".to_string(),
        }];

        let prompt = build_system_prompt(&sources, &history);
        let intro = prompt.find("## About me").unwrap();
        let knowledge_pos = prompt.find("## Things to know about me").unwrap();
        let projects = prompt.find("## My projects").unwrap();
        let experiences = prompt.find("## My work experience").unwrap();
        let conversation = prompt.find("## Recent conversation").unwrap();
        assert!(intro < knowledge_pos);
        assert!(knowledge_pos < projects);
        assert!(projects < experiences);
        assert!(experiences < conversation);
    }

    #[test]
    fn test_project_fields_all_rendered() {
        let sources = PromptSources {
            projects: vec![sample_project()],
            ..Default::default()
        };
        let prompt = build_system_prompt(&sources, &[]);
        assert!(prompt.contains("Portfolio Site"));
        assert!(prompt.contains("Built the chat flow"));
        assert!(prompt.contains("Tech: Rust, Axum"));
        assert!(prompt.contains("Link: https://example.com"));
    }

    #[test]
    fn test_history_rendered_as_alternating_lines() {
        let history = vec![
            HistoryTurn {
                question: "first?".to_string(),
                answer: "one".to_string(),
            },
            HistoryTurn {
                question: "second?".to_string(),
                answer: "two".to_string(),
            },
        ];
        let prompt = build_system_prompt(&PromptSources::default(), &history);
        let first = prompt.find("Q: first?").unwrap();
        let second = prompt.find("Q: second?").unwrap();
        assert!(first < second);
        assert!(prompt.contains("A: one"));
    }

    #[test]
    fn test_empty_sources_omit_sections() {
        let prompt = build_system_prompt(&PromptSources::default(), &[]);
        assert!(!prompt.contains("## About me"));
        assert!(!prompt.contains("## My projects"));
        assert!(!prompt.contains("## Recent conversation"));
        // 人设前言始终存在
        assert!(prompt.contains("first person"));
    }
}
