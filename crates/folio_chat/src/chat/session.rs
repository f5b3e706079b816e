//! 会话与历史管理
//!
//! 会话 id 由服务端在首轮铸造、客户端每次带回，服务端除已落库的
//! 对话记录外不持有任何会话状态。上下文窗口只取同一会话的记录，
//! 跨会话串上下文是正确性 bug。

use std::collections::HashMap;

use chrono::{Days, Local, NaiveDate};
use folio_chat_entity::conversation_turn;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder, Set};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::showcase::is_showcase_answer;
use crate::utils::time_format::{now_standard_string, parse_standard_string};

/// 上下文窗口大小：丢掉空白轮次后，取最近 10 轮有效问答
pub const HISTORY_WINDOW: usize = 10;

/// 一轮历史问答
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryTurn {
    pub question: String,
    pub answer: String,
}

/// 铸造新的会话 id
pub fn mint_session_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// 历史窗口裁剪：先丢掉问题或回答为空白的轮次，再保留最近 cap 轮，旧→新
pub fn window_history(turns: Vec<HistoryTurn>, cap: usize) -> Vec<HistoryTurn> {
    let effective: Vec<HistoryTurn> = turns
        .into_iter()
        .filter(|turn| !turn.question.trim().is_empty() && !turn.answer.trim().is_empty())
        .collect();

    let skip = effective.len().saturating_sub(cap);
    effective.into_iter().skip(skip).collect()
}

/// 从数据库取当前会话的上下文窗口（只查该 session_id 的记录）
pub async fn fetch_history(db: &DatabaseConnection, session_id: &str) -> Result<Vec<HistoryTurn>, DbErr> {
    let turns = conversation_turn::Entity::find()
        .filter(conversation_turn::Column::SessionId.eq(session_id))
        .order_by_asc(conversation_turn::Column::Id)
        .all(db)
        .await?
        .into_iter()
        .map(|model| HistoryTurn {
            question: model.question,
            answer: model.answer,
        })
        .collect();

    Ok(window_history(turns, HISTORY_WINDOW))
}

/// 落库一轮问答（追加写）
pub async fn record_turn(
    db: &DatabaseConnection,
    session_id: Option<&str>,
    question: &str,
    answer: &str,
) -> Result<(), DbErr> {
    let turn = conversation_turn::ActiveModel {
        question: Set(question.to_string()),
        answer: Set(answer.to_string()),
        session_id: Set(session_id.map(|s| s.to_string())),
        created_at: Set(now_standard_string()),
        ..Default::default()
    };
    turn.insert(db).await?;
    debug!("已记录一轮问答: session_id={:?}", session_id);
    Ok(())
}

/// 分组排序方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GroupOrder {
    Asc,
    /// 最新会话在前
    #[default]
    Desc,
}

impl GroupOrder {
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "asc" => GroupOrder::Asc,
            _ => GroupOrder::Desc,
        }
    }
}

/// 一组同会话的对话记录（派生数据，不落库）
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionGroup {
    /// None 表示早期没有会话 id 的遗留记录
    pub session_id: Option<String>,
    /// 按组内首轮时间生成的展示标签
    pub label: String,
    pub turns: Vec<conversation_turn::Model>,
}

/// 把平铺的对话记录按会话分组并排序
pub fn group_sessions(
    turns: Vec<conversation_turn::Model>,
    order: GroupOrder,
    hide_showcase: bool,
) -> Vec<SessionGroup> {
    group_sessions_at(turns, order, hide_showcase, Local::now().date_naive())
}

/// 分组核心，today 显式传入以便测试
///
/// hide_showcase 先过滤掉带哨兵串的轮次再分组，被过滤成空的组直接省略
pub fn group_sessions_at(
    turns: Vec<conversation_turn::Model>,
    order: GroupOrder,
    hide_showcase: bool,
    today: NaiveDate,
) -> Vec<SessionGroup> {
    let turns: Vec<_> = if hide_showcase {
        turns.into_iter().filter(|turn| !is_showcase_answer(&turn.answer)).collect()
    } else {
        turns
    };

    // 按 session_id 分桶，无 id 的记录进同一个遗留桶
    let mut buckets: HashMap<Option<String>, Vec<conversation_turn::Model>> = HashMap::new();
    for turn in turns {
        buckets.entry(turn.session_id.clone()).or_default().push(turn);
    }

    let mut groups: Vec<SessionGroup> = buckets
        .into_iter()
        .filter(|(_, members)| !members.is_empty())
        .map(|(session_id, mut members)| {
            members.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
            let label = format_group_label(&members[0].created_at, today);
            SessionGroup {
                session_id,
                label,
                turns: members,
            }
        })
        .collect();

    groups.sort_by(|a, b| {
        let key_a = (&a.turns[0].created_at, a.turns[0].id);
        let key_b = (&b.turns[0].created_at, b.turns[0].id);
        match order {
            GroupOrder::Asc => key_a.cmp(&key_b),
            GroupOrder::Desc => key_b.cmp(&key_a),
        }
    });
    groups
}

/// 组标签：今天/昨天显示相对日期，其余显示完整日期，都带时分
fn format_group_label(created_at: &str, today: NaiveDate) -> String {
    let Some(parsed) = parse_standard_string(created_at) else {
        // 时间串不合法时原样展示，不让分组崩掉
        return created_at.to_string();
    };

    let date = parsed.date();
    let time = parsed.format("%H:%M");
    if date == today {
        format!("今天 {}", time)
    } else if Some(date) == today.checked_sub_days(Days::new(1)) {
        format!("昨天 {}", time)
    } else {
        format!("{} {}", date.format("%Y-%m-%d"), time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::showcase::PROJECT_SHOWCASE;

    fn turn_model(id: i32, session_id: Option<&str>, answer: &str, created_at: &str) -> conversation_turn::Model {
        conversation_turn::Model {
            id,
            question: format!("question {}", id),
            answer: answer.to_string(),
            session_id: session_id.map(|s| s.to_string()),
            created_at: created_at.to_string(),
        }
    }

    fn history(n: usize) -> Vec<HistoryTurn> {
        (1..=n)
            .map(|i| HistoryTurn {
                question: format!("q{}", i),
                answer: format!("a{}", i),
            })
            .collect()
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 30).unwrap()
    }

    #[test]
    fn test_window_keeps_last_ten_effective_turns() {
        // 第 11 次提问时已有 10 轮历史，窗口应包含全部 10 轮
        let windowed = window_history(history(10), HISTORY_WINDOW);
        assert_eq!(windowed.len(), 10);
        assert_eq!(windowed[0].question, "q1");

        // 第 12 次提问时已有 11 轮历史，窗口应为第 2..=11 轮
        let windowed = window_history(history(11), HISTORY_WINDOW);
        assert_eq!(windowed.len(), 10);
        assert_eq!(windowed[0].question, "q2");
        assert_eq!(windowed[9].question, "q11");
    }

    #[test]
    fn test_window_drops_empty_turns_before_capping() {
        let mut turns = history(12);
        turns[0].answer = "   ".to_string();
        turns[5].question = String::new();
        // 12 轮里 2 轮空白，有效 10 轮全部保留
        let windowed = window_history(turns, HISTORY_WINDOW);
        assert_eq!(windowed.len(), 10);
        assert!(windowed.iter().all(|t| !t.question.is_empty()));
        assert_eq!(windowed[0].question, "q2");
    }

    #[test]
    fn test_window_preserves_order_oldest_first() {
        let windowed = window_history(history(3), HISTORY_WINDOW);
        let questions: Vec<_> = windowed.iter().map(|t| t.question.as_str()).collect();
        assert_eq!(questions, vec!["q1", "q2", "q3"]);
    }

    #[test]
    fn test_mint_session_id_is_unique() {
        assert_ne!(mint_session_id(), mint_session_id());
    }

    #[test]
    fn test_group_by_session_with_legacy_bucket() {
        let turns = vec![
            turn_model(1, Some("s1"), "a", "2026-08-30 09:00:00"),
            turn_model(2, None, "a", "2026-08-28 08:00:00"),
            turn_model(3, Some("s1"), "a", "2026-08-30 09:05:00"),
            turn_model(4, Some("s2"), "a", "2026-08-29 20:00:00"),
        ];
        let groups = group_sessions_at(turns, GroupOrder::Desc, false, today());

        assert_eq!(groups.len(), 3);
        // 最新会话在前
        assert_eq!(groups[0].session_id.as_deref(), Some("s1"));
        assert_eq!(groups[0].turns.len(), 2);
        assert_eq!(groups[1].session_id.as_deref(), Some("s2"));
        assert_eq!(groups[2].session_id, None);
    }

    #[test]
    fn test_group_labels_today_yesterday_absolute() {
        let turns = vec![
            turn_model(1, Some("s1"), "a", "2026-08-30 09:00:00"),
            turn_model(2, Some("s2"), "a", "2026-08-29 20:00:00"),
            turn_model(3, Some("s3"), "a", "2026-08-01 07:30:00"),
        ];
        let groups = group_sessions_at(turns, GroupOrder::Asc, false, today());

        assert_eq!(groups[0].label, "2026-08-01 07:30");
        assert_eq!(groups[1].label, "昨天 20:00");
        assert_eq!(groups[2].label, "今天 09:00");
    }

    #[test]
    fn test_grouping_is_idempotent() {
        let turns = vec![
            turn_model(1, Some("s1"), "a", "2026-08-30 09:00:00"),
            turn_model(2, Some("s2"), PROJECT_SHOWCASE, "2026-08-29 20:00:00"),
            turn_model(3, None, "a", "2026-08-28 08:00:00"),
        ];
        let first = group_sessions_at(turns.clone(), GroupOrder::Desc, true, today());
        let second = group_sessions_at(turns, GroupOrder::Desc, true, today());
        assert_eq!(first, second);
    }

    #[test]
    fn test_hide_showcase_removes_only_sentinel_turns() {
        let turns = vec![
            turn_model(1, Some("s1"), "a plain answer", "2026-08-30 09:00:00"),
            turn_model(2, Some("s1"), PROJECT_SHOWCASE, "2026-08-30 09:01:00"),
            turn_model(3, Some("s1"), "EXPERIENCE_SHOWCASE", "2026-08-30 09:02:00"),
        ];
        let groups = group_sessions_at(turns, GroupOrder::Desc, true, today());

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].turns.len(), 1);
        assert_eq!(groups[0].turns[0].id, 1);
    }

    #[test]
    fn test_group_emptied_by_filter_is_omitted() {
        let turns = vec![
            turn_model(1, Some("s1"), PROJECT_SHOWCASE, "2026-08-30 09:00:00"),
            turn_model(2, Some("s2"), "plain", "2026-08-30 10:00:00"),
        ];
        let groups = group_sessions_at(turns, GroupOrder::Desc, true, today());

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].session_id.as_deref(), Some("s2"));
    }

    #[test]
    fn test_order_asc_vs_desc() {
        let turns = vec![
            turn_model(1, Some("s1"), "a", "2026-08-30 09:00:00"),
            turn_model(2, Some("s2"), "a", "2026-08-30 10:00:00"),
        ];
        let asc = group_sessions_at(turns.clone(), GroupOrder::Asc, false, today());
        let desc = group_sessions_at(turns, GroupOrder::Desc, false, today());

        assert_eq!(asc[0].session_id.as_deref(), Some("s1"));
        assert_eq!(desc[0].session_id.as_deref(), Some("s2"));
    }

    #[test]
    fn test_unparseable_timestamp_label_does_not_panic() {
        let turns = vec![turn_model(1, Some("s1"), "a", "not-a-date")];
        let groups = group_sessions_at(turns, GroupOrder::Desc, false, today());
        assert_eq!(groups[0].label, "not-a-date");
    }

    #[test]
    fn test_group_order_from_str() {
        assert_eq!(GroupOrder::from_str("asc"), GroupOrder::Asc);
        assert_eq!(GroupOrder::from_str("ASC"), GroupOrder::Asc);
        assert_eq!(GroupOrder::from_str("desc"), GroupOrder::Desc);
        assert_eq!(GroupOrder::from_str(""), GroupOrder::Desc);
    }
}
