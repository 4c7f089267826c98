//! Rewrite rule table
//!
//! Every category maps to one fixed [`Rule`]. Unknown categories use the
//! fallback prefix together with the research suffix.

use super::category::Category;

/// Fixed phrases applied for one category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rule {
    pub prefix:       &'static str,
    pub suffix:       &'static str,
    pub improvements: &'static [&'static str],
    pub suggestions:  [&'static str; 3],
}

/// Improvements reported for every rewrite, ahead of the category ones
pub const BASE_IMPROVEMENTS: [&str; 3] = [
    "增加了上下文信息，使AI更好理解需求",
    "明确了输出格式和结构要求",
    "添加了具体的质量标准和期望",
];

pub const FALLBACK_PREFIX: &str = "请优化以下内容：";

/// Unknown categories end with the research suffix, not a generic one
pub const FALLBACK_SUFFIX: &str = RESEARCH.suffix;

pub const FALLBACK_SUGGESTIONS: [&str; 3] = [
    "尝试使用更具体的描述词",
    "添加输出格式要求",
    "明确质量标准",
];

const CREATIVE: Rule = Rule {
    prefix:       "创作一个富有想象力和创意的",
    suffix:       "，要求内容生动有趣，具有强烈的视觉冲击力。",
    improvements: &["增强了创意表达的引导", "添加了情感色彩的描述"],
    suggestions:  [
        "尝试添加具体的风格描述（如\"扁平化设计风格\"）",
        "指定色彩搭配或视觉风格",
        "添加目标受众信息",
    ],
};

const TECHNICAL: Rule = Rule {
    prefix:       "请详细解释并提供具体的技术实现方案：",
    suffix:       "，需要包含代码示例和最佳实践。",
    improvements: &["明确了技术难度等级", "添加了代码示例要求"],
    suggestions:  ["指定编程语言或技术栈", "明确性能或安全要求", "添加错误处理需求"],
};

const BUSINESS: Rule = Rule {
    prefix:       "从商业角度分析并提供可行的解决方案：",
    suffix:       "，请提供ROI分析和实施步骤。",
    improvements: &["增加了商业价值评估", "明确了目标受众"],
    suggestions:  ["明确预算范围和时间限制", "指定行业背景和竞争环境", "添加成功指标定义"],
};

const EDUCATIONAL: Rule = Rule {
    prefix:       "用清晰易懂的方式教授和解释：",
    suffix:       "，使用比喻和实例帮助理解。",
    improvements: &["优化了教学逻辑结构", "增加了互动性元素"],
    suggestions:  ["指定学习者的知识水平", "添加实践练习要求", "明确学习目标和成果"],
};

const RESEARCH: Rule = Rule {
    prefix:       "进行深入的研究分析并提供数据支持：",
    suffix:       "，请引用可靠来源和数据。",
    improvements: &["强化了数据要求", "明确了研究方法论"],
    suggestions:  ["指定研究时间范围", "明确数据来源要求", "添加研究方法限制"],
};

const FALLBACK: Rule = Rule {
    prefix:       FALLBACK_PREFIX,
    suffix:       FALLBACK_SUFFIX,
    improvements: &[],
    suggestions:  FALLBACK_SUGGESTIONS,
};

/// Look up the rule for a category
pub fn rule_for(category: &Category) -> &'static Rule {
    match category {
        Category::Creative => &CREATIVE,
        Category::Technical => &TECHNICAL,
        Category::Business => &BUSINESS,
        Category::Educational => &EDUCATIONAL,
        Category::Research => &RESEARCH,
        Category::Unknown(_) => &FALLBACK,
    }
}
