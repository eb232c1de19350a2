//! Typed response payloads for task and statistics queries.

use serde::Deserialize;

/// Returned by the push endpoints when a delivery task is created.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TaskId {
    pub task_id: String,
}

/// A scheduled task as reported by `GET /task/schedule/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ScheduleTask {
    pub task_id: String,
    pub status: String,
    #[serde(default)]
    pub create_time: String,
    #[serde(default)]
    pub schedule_time: String,
}

/// Online status of a single client.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CidStatus {
    pub cid: String,
    pub status: String,
}

/// Delivery funnel counts for one task.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TaskStatistics {
    pub task_id: String,
    #[serde(default)]
    pub send_count: i64,
    #[serde(default)]
    pub receive_count: i64,
    #[serde(default)]
    pub display_count: i64,
    #[serde(default)]
    pub click_count: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn task_statistics_default_missing_counts() {
        let stats: TaskStatistics = serde_json::from_value(json!({
            "task_id": "t-1",
            "send_count": 120,
            "receive_count": 98
        }))
        .unwrap();

        assert_eq!(stats.send_count, 120);
        assert_eq!(stats.receive_count, 98);
        assert_eq!(stats.display_count, 0);
        assert_eq!(stats.click_count, 0);
    }

    #[test]
    fn schedule_task_parses() {
        let task: ScheduleTask = serde_json::from_value(json!({
            "task_id": "t-2",
            "status": "waiting",
            "create_time": "1650770177961",
            "schedule_time": "1650780000000"
        }))
        .unwrap();
        assert_eq!(task.status, "waiting");
    }
}
