use crate::args::CategoryArgs;
use crate::commands::Out;
use crate::model::{lookup, CategoryInfo};
use crate::store::dataset_schema;
use crate::Result;

/// Looks up the display metadata for a category code. Unknown codes resolve to the `other` entry
/// and the message says so.
pub fn category(args: &CategoryArgs) -> Result<Out<CategoryInfo>> {
    let info = *lookup(&args.code, args.kind);
    let mut message = format!(
        "{} ({}): {}, icon {}, color {}",
        info.code, args.kind, info.label, info.icon, info.color
    );
    if let Some(background) = info.background {
        message.push_str(&format!(", background {background}"));
    }
    if info.code != args.code {
        message.push_str(&format!("\n'{}' is not a known {} code", args.code, args.kind));
    }
    Ok(Out::new(message, info))
}

/// The JSON schema of the data file.
pub fn schema() -> Result<Out<schemars::Schema>> {
    let schema = dataset_schema();
    let message = serde_json::to_string_pretty(&schema).unwrap_or_default();
    Ok(Out::new(message, schema))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CategoryKind;

    fn args(code: &str, kind: CategoryKind) -> CategoryArgs {
        CategoryArgs {
            code: code.to_string(),
            kind,
        }
    }

    #[test]
    fn test_known_code() {
        let out = category(&args("food", CategoryKind::Expense)).unwrap();
        assert_eq!(out.structure().unwrap().code, "food");
        assert!(!out.message().contains("not a known"));
    }

    #[test]
    fn test_unknown_code_falls_back() {
        let out = category(&args("lottery", CategoryKind::Income)).unwrap();
        assert_eq!(out.structure().unwrap().code, "other");
        assert!(out.message().contains("'lottery' is not a known income code"));
    }

    #[test]
    fn test_schema_names_the_lists() {
        let out = schema().unwrap();
        assert!(out.message().contains("savingsGoals"));
        assert!(out.message().contains("shoppingList"));
    }
}
