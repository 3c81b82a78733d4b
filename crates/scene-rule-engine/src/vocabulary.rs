//! 各上下文可用的规则字段
//!
//! 字段元数据仅用于规则编辑校验与决策原因展示，不参与评估。

use serde::Serialize;

use crate::models::RuleContext;
use crate::operators::Operator;

/// 字段值在编辑界面中的类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    Text,
    Number,
    Date,
}

/// 字段定义
#[derive(Debug, Clone, Serialize)]
pub struct FieldDefinition {
    pub path: &'static str,
    pub label: &'static str,
    pub operators: &'static [Operator],
    pub value_type: ValueType,
    pub help_text: &'static str,
}

impl FieldDefinition {
    pub fn allows(&self, operator: Operator) -> bool {
        self.operators.contains(&operator)
    }
}

const TEXT_OPERATORS: &[Operator] = &[Operator::Include, Operator::Exclude];
const NUMBER_OPERATORS: &[Operator] = &[
    Operator::Include,
    Operator::Exclude,
    Operator::IsLargerThan,
    Operator::IsSmallerThan,
];
const COUNT_OPERATORS: &[Operator] = &[
    Operator::IsLargerThan,
    Operator::IsSmallerThan,
    Operator::Include,
];

/// 外部目录（新增场景）的字段，表演者属性多嵌套一层
static ADD_SCENE_FIELDS: &[FieldDefinition] = &[
    FieldDefinition {
        path: "tags",
        label: "Tags",
        operators: TEXT_OPERATORS,
        value_type: ValueType::Text,
        help_text: "Check if a scene has specific tags. Use a comma-separated list for multiple values.",
    },
    FieldDefinition {
        path: "performers.performer.name",
        label: "Performer Name",
        operators: TEXT_OPERATORS,
        value_type: ValueType::Text,
        help_text: "Check if at least one performer matches the criteria.",
    },
    FieldDefinition {
        path: "studio.name",
        label: "Studio",
        operators: TEXT_OPERATORS,
        value_type: ValueType::Text,
        help_text: "Check the studio that produced the scene.",
    },
    FieldDefinition {
        path: "title",
        label: "Title",
        operators: TEXT_OPERATORS,
        value_type: ValueType::Text,
        help_text: "Check the title of a scene.",
    },
    FieldDefinition {
        path: "performers.performer.ethnicity",
        label: "Performer Ethnicity",
        operators: TEXT_OPERATORS,
        value_type: ValueType::Text,
        help_text: "Check if at least one performer matches the ethnicity. Use comma-separated list for multiple values.",
    },
    FieldDefinition {
        path: "performers.performer.gender",
        label: "Performer Gender",
        operators: TEXT_OPERATORS,
        value_type: ValueType::Text,
        help_text: "Check if at least one performer matches the gender (MALE, FEMALE, TRANSGENDER_MALE, TRANSGENDER_FEMALE, INTERSEX, NON_BINARY).",
    },
    FieldDefinition {
        path: "performers.performer.measurements.cup_size",
        label: "Cup Size",
        operators: TEXT_OPERATORS,
        value_type: ValueType::Text,
        help_text: "Check if at least one performer matches the cup size. Use single letters (D matches D, DD, DDD, etc.)",
    },
    FieldDefinition {
        path: "performers.performer.measurements.waist",
        label: "Waist Size",
        operators: NUMBER_OPERATORS,
        value_type: ValueType::Number,
        help_text: "Check if at least one performer matches waist measurements in inches",
    },
    FieldDefinition {
        path: "performers.performer.measurements.hip",
        label: "Hip Size",
        operators: NUMBER_OPERATORS,
        value_type: ValueType::Number,
        help_text: "Check if at least one performer matches hip measurements in inches",
    },
    FieldDefinition {
        path: "date",
        label: "Release Date",
        operators: NUMBER_OPERATORS,
        value_type: ValueType::Date,
        help_text: "Check the release date of the scene (YYYY-MM-DD format)",
    },
    FieldDefinition {
        path: "performers.count",
        label: "Performer Count",
        operators: COUNT_OPERATORS,
        value_type: ValueType::Number,
        help_text: "Check the number of performers in the scene. Use 'include' to match exact count.",
    },
];

/// 本地库（清理场景）的字段，三围由 measurements 字符串解析得到
static CLEAN_SCENE_FIELDS: &[FieldDefinition] = &[
    FieldDefinition {
        path: "tags",
        label: "Tags",
        operators: TEXT_OPERATORS,
        value_type: ValueType::Text,
        help_text: "Check if a scene has specific tags. Use a comma-separated list for multiple values.",
    },
    FieldDefinition {
        path: "performers.name",
        label: "Performer Name",
        operators: TEXT_OPERATORS,
        value_type: ValueType::Text,
        help_text: "Check if at least one performer matches the criteria.",
    },
    FieldDefinition {
        path: "studio.name",
        label: "Studio",
        operators: TEXT_OPERATORS,
        value_type: ValueType::Text,
        help_text: "Check the studio that produced the scene.",
    },
    FieldDefinition {
        path: "title",
        label: "Title",
        operators: TEXT_OPERATORS,
        value_type: ValueType::Text,
        help_text: "Check the title of a scene.",
    },
    FieldDefinition {
        path: "performers.ethnicity",
        label: "Performer Ethnicity",
        operators: TEXT_OPERATORS,
        value_type: ValueType::Text,
        help_text: "Check if at least one performer matches the ethnicity. Use comma-separated list for multiple values.",
    },
    FieldDefinition {
        path: "performers.gender",
        label: "Performer Gender",
        operators: TEXT_OPERATORS,
        value_type: ValueType::Text,
        help_text: "Check if at least one performer matches the gender (MALE, FEMALE, TRANSGENDER_MALE, TRANSGENDER_FEMALE, INTERSEX, NON_BINARY).",
    },
    FieldDefinition {
        path: "performers.cup_size",
        label: "Cup Size",
        operators: TEXT_OPERATORS,
        value_type: ValueType::Text,
        help_text: "Check if at least one performer matches the cup size. Use single letters (D matches D, DD, DDD, etc.) - parsed from measurements",
    },
    FieldDefinition {
        path: "performers.waist",
        label: "Waist Size",
        operators: NUMBER_OPERATORS,
        value_type: ValueType::Number,
        help_text: "Check if at least one performer matches waist measurements in inches - parsed from measurements",
    },
    FieldDefinition {
        path: "performers.hip",
        label: "Hip Size",
        operators: NUMBER_OPERATORS,
        value_type: ValueType::Number,
        help_text: "Check if at least one performer matches hip measurements in inches - parsed from measurements",
    },
    FieldDefinition {
        path: "date",
        label: "Release Date",
        operators: NUMBER_OPERATORS,
        value_type: ValueType::Date,
        help_text: "Check the release date of the scene (YYYY-MM-DD format)",
    },
    FieldDefinition {
        path: "performers.count",
        label: "Performer Count",
        operators: COUNT_OPERATORS,
        value_type: ValueType::Number,
        help_text: "Check the number of performers in the scene. Use 'include' to match exact count.",
    },
];

/// 获取上下文的全部字段
pub fn fields(context: RuleContext) -> &'static [FieldDefinition] {
    match context {
        RuleContext::AddScenes => ADD_SCENE_FIELDS,
        RuleContext::CleanScenes => CLEAN_SCENE_FIELDS,
    }
}

/// 查找字段定义
pub fn lookup(context: RuleContext, path: &str) -> Option<&'static FieldDefinition> {
    fields(context).iter().find(|f| f.path == path)
}

/// 字段展示名，未声明的字段直接使用路径
pub fn label<'a>(context: RuleContext, path: &'a str) -> &'a str {
    lookup(context, path).map(|f| f.label).unwrap_or(path)
}
