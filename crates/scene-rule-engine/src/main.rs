//! 场景规则命令行
//!
//! 读取规则文件与场景文件，对每个场景输出一行 JSON 决策。
//!
//! 用法：`scene-rules <add|clean> [records.json]`

use anyhow::{bail, Context, Result};
use rule_engine::{Rule, RuleContext, RuleRepository, SceneRuleService, SyncDirection};
use scene_shared::config::AppConfig;
use scene_shared::io::read_json_file;
use scene_shared::SceneError;
use scene_shared::observability;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

/// 规则文件：按上下文分组
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RuleFile {
    add_scenes: Vec<Rule>,
    clean_scenes: Vec<Rule>,
}

/// 单个场景的输出行
#[derive(Serialize)]
struct DecisionLine<'a> {
    title: &'a str,
    #[serde(flatten)]
    decision: rule_engine::Decision,
}

fn main() -> Result<()> {
    let config = AppConfig::load("scene-rules").unwrap_or_else(|e| {
        eprintln!("Failed to load config, using defaults: {}", e);
        AppConfig::default()
    });

    let _guard = observability::init(&config.observability)?;
    rule_engine::describe_metrics();

    let mut args = std::env::args().skip(1);
    let context: RuleContext = match args.next() {
        Some(raw) => raw.parse().map_err(SceneError::from)?,
        None => bail!("usage: scene-rules <add|clean> [records.json]"),
    };

    let records_path = args
        .next()
        .map(Into::into)
        .or_else(|| config.engine.records_path.clone())
        .context("no records file given and engine.records_path is not set")?;

    let service = if config.engine.trace_enabled {
        SceneRuleService::in_memory().with_trace()
    } else {
        SceneRuleService::in_memory()
    };

    if let Some(rules_path) = &config.engine.rules_path {
        let file: RuleFile = read_json_file(rules_path)?;
        info!(
            path = %rules_path.display(),
            add = file.add_scenes.len(),
            clean = file.clean_scenes.len(),
            "Loaded rule file"
        );
        let rules = service.rules();
        rules
            .save_rules(RuleContext::AddScenes, file.add_scenes)
            .and_then(|_| rules.save_rules(RuleContext::CleanScenes, file.clean_scenes))
            .map_err(SceneError::from)?;
    } else {
        warn!("engine.rules_path is not set, every scene gets the default decision");
    }

    if config.sync.enabled {
        let applied = config
            .sync
            .direction
            .parse::<SyncDirection>()
            .and_then(|direction| service.update_sync_settings(true, direction));
        if let Err(e) = applied.map_err(SceneError::from) {
            warn!(
                code = e.code(),
                user_error = e.is_user_error(),
                error = %e,
                "Rule synchronization stays disabled"
            );
        }
    }

    let records: Vec<Value> = read_json_file(&records_path)?;
    info!(context = %context, count = records.len(), "Evaluating scenes");

    for record in &records {
        let title = record.get("title").and_then(Value::as_str).unwrap_or("Untitled");
        let line = DecisionLine {
            title,
            decision: service.evaluate(context, record),
        };
        println!("{}", serde_json::to_string(&line)?);
    }

    Ok(())
}
