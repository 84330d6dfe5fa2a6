use std::path::Path;

/// Every type the frontend consumes, in output order
pub const EXPORTED_TYPES: &[&str] = &[
    "Question",
    "Answer",
    "CreateQuestionRequest",
    "CreateAnswerRequest",
    "ReceivedQuestionsQuery",
    "QuestionResponse",
    "QuestionListResponse",
    "AnswerResponse",
    "AnswerListResponse",
    "UserInfo",
    "ErrorResponse",
];

pub fn generate_typescript_definitions(
    type_names: &[&str],
) -> Result<String, Box<dyn std::error::Error>> {
    if type_names.is_empty() {
        return Err("No type names provided".into());
    }

    let mut definitions = Vec::new();

    for name in type_names {
        let type_def = export_type(name)?;
        let cleaned = clean_type(type_def);

        if !cleaned.trim().is_empty() {
            definitions.push(cleaned);
        }
    }

    Ok(definitions.join("\n\n"))
}

/// Writes all exported types into a single `.ts` file, creating parent directories
pub fn write_typescript_definitions(output_path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let output = generate_typescript_definitions(EXPORTED_TYPES)?;

    if let Some(parent) = output_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(output_path, format!("{}\n", output))?;

    Ok(())
}

fn export_type(name: &str) -> Result<String, Box<dyn std::error::Error>> {
    use crate::*;
    use ts_rs::TS;

    let result = match name {
        "Question" => Question::export_to_string()?,
        "Answer" => Answer::export_to_string()?,
        "CreateQuestionRequest" => CreateQuestionRequest::export_to_string()?,
        "CreateAnswerRequest" => CreateAnswerRequest::export_to_string()?,
        "ReceivedQuestionsQuery" => ReceivedQuestionsQuery::export_to_string()?,
        "QuestionResponse" => QuestionResponse::export_to_string()?,
        "QuestionListResponse" => QuestionListResponse::export_to_string()?,
        "AnswerResponse" => AnswerResponse::export_to_string()?,
        "AnswerListResponse" => AnswerListResponse::export_to_string()?,
        "UserInfo" => UserInfo::export_to_string()?,
        "ErrorResponse" => ErrorResponse::export_to_string()?,
        _ => {
            return Err(format!(
                "Unknown type: '{}'. Available types can be found in shared-types/src/",
                name
            )
            .into());
        }
    };

    Ok(result)
}

fn clean_type(mut type_def: String) -> String {
    type_def.retain(|c| c != '\r');

    let lines: Vec<&str> = type_def.lines().collect();

    let filtered: Vec<&str> = lines
        .iter()
        .filter(|line| {
            let trimmed = line.trim();
            !trimmed.starts_with("import type")
                && !trimmed.starts_with("// This file was generated")
        })
        .cloned()
        .collect();

    filtered.join("\n").trim().to_string()
}
