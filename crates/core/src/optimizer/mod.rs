//! Transformation engine
//!
//! Turns a prompt and a category into a rewritten prompt plus fixed
//! improvement and suggestion lists. The result depends only on the inputs.
//! [`Optimizer::optimize`] waits for a configurable latency first, standing
//! in for a remote model call.

use std::time::Duration;

use log::debug;
use serde::{Deserialize, Serialize};

pub mod category;
pub mod rules;

pub use category::{Category, Target};
use rules::{rule_for, BASE_IMPROVEMENTS};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptimizationRequest {
    pub prompt:   String,
    pub category: Category,
    /// `None` when the user picked no target model
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target:   Option<Target>,
}

impl OptimizationRequest {
    /// Target the rewrite is aimed at, `general` when none was picked
    pub fn effective_target(&self) -> Target {
        self.target.clone().unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptimizationResponse {
    pub optimized:    String,
    pub improvements: Vec<String>,
    pub suggestions:  Vec<String>,
}

/// Build the rewritten prompt: prefix, original verbatim, suffix
pub fn optimized_prompt(original: &str, category: &Category) -> String {
    let rule = rule_for(category);
    let mut out = String::with_capacity(rule.prefix.len() + original.len() + rule.suffix.len());
    out.push_str(rule.prefix);
    out.push_str(original);
    out.push_str(rule.suffix);
    out
}

pub fn improvements(category: &Category) -> Vec<String> {
    BASE_IMPROVEMENTS
        .iter()
        .chain(rule_for(category).improvements)
        .map(|s| s.to_string())
        .collect()
}

pub fn suggestions(category: &Category) -> Vec<String> {
    rule_for(category)
        .suggestions
        .iter()
        .map(|s| s.to_string())
        .collect()
}

/// Synchronous core of the engine, total over all inputs
pub fn transform(prompt: &str, category: &Category) -> OptimizationResponse {
    OptimizationResponse {
        optimized:    optimized_prompt(prompt, category),
        improvements: improvements(category),
        suggestions:  suggestions(category),
    }
}

#[derive(Debug, Clone, Default)]
pub struct Optimizer {
    latency: Duration,
}

impl Optimizer {
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }

    /// Optimizer with no simulated delay
    pub fn immediate() -> Self {
        Self::default()
    }

    pub fn latency(&self) -> Duration {
        self.latency
    }

    pub async fn optimize(&self, request: &OptimizationRequest) -> OptimizationResponse {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        debug!(
            "optimized prompt (category={}, target={}, prompt_len={})",
            request.category,
            request.effective_target(),
            request.prompt.chars().count()
        );
        transform(&request.prompt, &request.category)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn request(prompt: &str, category: &str) -> OptimizationRequest {
        OptimizationRequest {
            prompt:   prompt.to_string(),
            category: Category::parse(category),
            target:   None,
        }
    }

    #[test]
    fn test_known_category_wraps_prompt() {
        for category in Category::KNOWN {
            let rule = rule_for(&category);
            let out = optimized_prompt("解释量子计算的基本原理", &category);
            assert!(out.starts_with(rule.prefix));
            assert!(out.ends_with(rule.suffix));
            assert!(out.contains("解释量子计算的基本原理"));
        }
    }

    #[test]
    fn test_creative_exact_output() {
        assert_eq!(
            optimized_prompt("写一篇文章", &Category::Creative),
            "创作一个富有想象力和创意的写一篇文章，要求内容生动有趣，具有强烈的视觉冲击力。"
        );
    }

    #[test]
    fn test_unknown_category_fallback() {
        assert_eq!(
            optimized_prompt("hello", &Category::parse("poetry")),
            "请优化以下内容：hello，请引用可靠来源和数据。"
        );
        assert_eq!(improvements(&Category::parse("poetry")), BASE_IMPROVEMENTS.to_vec());
        assert_eq!(
            suggestions(&Category::parse("")),
            vec!["尝试使用更具体的描述词", "添加输出格式要求", "明确质量标准"]
        );
    }

    #[test]
    fn test_improvements_base_then_category() {
        let list = improvements(&Category::Technical);
        assert_eq!(list.len(), 5);
        assert_eq!(list[..3].to_vec(), BASE_IMPROVEMENTS.map(String::from).to_vec());
        assert_eq!(list[3], "明确了技术难度等级");
        assert_eq!(list[4], "添加了代码示例要求");
    }

    #[test]
    fn test_suggestions_per_category() {
        assert_eq!(
            suggestions(&Category::Business),
            vec!["明确预算范围和时间限制", "指定行业背景和竞争环境", "添加成功指标定义"]
        );
    }

    #[test]
    fn test_transform_accepts_empty_prompt() {
        let out = transform("", &Category::Research);
        assert_eq!(out.optimized, "进行深入的研究分析并提供数据支持：，请引用可靠来源和数据。");
    }

    #[tokio::test]
    async fn test_optimize_is_idempotent() {
        let optimizer = Optimizer::immediate();
        let req = request("编写一个Python爬虫程序", "technical");
        let first = optimizer.optimize(&req).await;
        let second = optimizer.optimize(&req).await;
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_target_does_not_change_output() {
        let optimizer = Optimizer::immediate();
        let mut req = request("帮我写一份产品介绍", "business");
        let general = optimizer.optimize(&req).await;
        req.target = Some(Target::Claude);
        assert_eq!(optimizer.optimize(&req).await, general);
    }

    #[tokio::test(start_paused = true)]
    async fn test_optimize_waits_for_latency() {
        let optimizer = Optimizer::new(Duration::from_millis(2000));
        let started = tokio::time::Instant::now();
        optimizer.optimize(&request("x", "creative")).await;
        assert!(started.elapsed() >= Duration::from_millis(2000));
    }

    #[test]
    fn test_request_target_absent_by_default() {
        let req: OptimizationRequest =
            serde_json::from_str(r#"{"prompt":"p","category":"research"}"#).unwrap();
        assert_eq!(req.target, None);
        assert_eq!(req.effective_target(), Target::General);
        assert_eq!(req.category, Category::Research);
    }
}
