//! 命令行参数解析
//!
//! - `probe`（默认）：检查全部实体表与认证角色
//! - `check <kind> <entity_id> <workspace_id>`：执行一次单实体访问守卫
//!
//! 内存后端启动时为空，`probe` 只是连通性空跑，`check` 被拒绝。

use collab_config::StoreBackend;
use domain::EntityKind;

pub const USAGE: &str = "usage: collab-probe [probe | check <kind> <entity_id> <workspace_id>]";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Probe,
    Check {
        kind: EntityKind,
        entity_id: String,
        workspace_id: String,
    },
}

impl Command {
    pub fn parse(args: impl IntoIterator<Item = String>) -> Result<Self, String> {
        let args: Vec<String> = args.into_iter().collect();
        match args.iter().map(String::as_str).collect::<Vec<_>>().as_slice() {
            [] | ["probe"] => Ok(Command::Probe),
            ["check", kind, entity_id, workspace_id] => {
                let kind = kind.parse::<EntityKind>().map_err(|err| err.to_string())?;
                Ok(Command::Check {
                    kind,
                    entity_id: entity_id.to_string(),
                    workspace_id: workspace_id.to_string(),
                })
            }
            _ => Err(USAGE.to_string()),
        }
    }

    /// 确认命令可在该存储后端上执行。
    pub fn ensure_backend(&self, backend: StoreBackend) -> Result<(), String> {
        match (self, backend) {
            (Command::Check { .. }, StoreBackend::Memory) => Err(
                "check requires COLLAB_STORE=postgres: the in-memory store holds no entities"
                    .to_string(),
            ),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    #[test]
    fn defaults_to_probe() {
        assert_eq!(Command::parse(args(&[])), Ok(Command::Probe));
        assert_eq!(Command::parse(args(&["probe"])), Ok(Command::Probe));
    }

    #[test]
    fn parses_check() {
        let command = Command::parse(args(&["check", "Document", "doc-1", "w1"])).expect("parse");
        assert_eq!(
            command,
            Command::Check {
                kind: EntityKind::Document,
                entity_id: "doc-1".to_string(),
                workspace_id: "w1".to_string(),
            }
        );
    }

    #[test]
    fn rejects_unknown_kind_and_arity() {
        assert_eq!(
            Command::parse(args(&["check", "invoice", "i-1", "w1"])),
            Err("unknown entity type: invoice".to_string())
        );
        assert_eq!(Command::parse(args(&["check", "task"])), Err(USAGE.to_string()));
    }

    #[test]
    fn check_requires_postgres_backend() {
        let command = Command::parse(args(&["check", "task", "task-1", "w1"])).expect("parse");
        let err = command
            .ensure_backend(StoreBackend::Memory)
            .expect_err("memory backend");
        assert!(err.starts_with("check requires COLLAB_STORE=postgres"));
        assert_eq!(command.ensure_backend(StoreBackend::Postgres), Ok(()));
    }

    #[test]
    fn probe_runs_on_any_backend() {
        assert_eq!(Command::Probe.ensure_backend(StoreBackend::Memory), Ok(()));
        assert_eq!(Command::Probe.ensure_backend(StoreBackend::Postgres), Ok(()));
    }
}
