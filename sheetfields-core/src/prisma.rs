//! Prisma schema generation from a field-column schema

use crate::config::SchemaConfig;
use crate::schema::FieldSchema;
use regex::Regex;
use std::collections::HashSet;
use std::fmt::Write;
use std::sync::LazyLock;
use tracing::warn;

static INVALID_IDENT_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-zA-Z0-9_]").unwrap());

/// Generate a Prisma schema with one model per sheet.
///
/// `source` names the workbook the field lists came from and only appears in
/// the header comment.
pub fn generate_prisma_schema(schema: &FieldSchema, config: &SchemaConfig, source: &str) -> String {
    let mut out = preamble(config, source);
    for (sheet_name, fields) in &schema.sheets {
        out.push_str(&render_model(sheet_name, fields, config));
    }
    out
}

fn preamble(config: &SchemaConfig, source: &str) -> String {
    format!(
        r#"// Auto-generated Prisma Schema based on {source}

generator client {{
  provider = "prisma-client-js"
}}

datasource db {{
  provider = "postgresql"
  url      = env("DATABASE_URL")
}}

model {model}Project {{
  id           Int      @id @default(autoincrement())
  reraNumber   String   @unique
  projectId    Int      @unique // Main ID
  projectName  String?
  rawResponses Json?
  createdAt    DateTime @default(now())
  updatedAt    DateTime @updatedAt

  @@map("{table}projects")
}}
"#,
        source = source,
        model = config.model_prefix,
        table = config.table_prefix,
    )
}

/// Render the model for one sheet
pub fn render_model(sheet_name: &str, fields: &[String], config: &SchemaConfig) -> String {
    let table_name = INVALID_IDENT_CHARS.replace_all(sheet_name, "").into_owned();
    let model_name = format!("{}{}", config.model_prefix, table_name);

    let mut raw_seen: HashSet<&str> = HashSet::new();
    let mut emitted: HashSet<String> = HashSet::new();
    let mut has_project_id = false;

    let mut out = String::new();
    let _ = writeln!(out, "model {} {{", model_name);
    out.push_str("  id Int @id @default(autoincrement())\n");

    for raw in fields {
        if !raw_seen.insert(raw.as_str()) {
            continue;
        }
        if raw == "projectId" {
            has_project_id = true;
        }

        let Some(field) = sanitize_field_name(raw) else {
            continue;
        };
        if !emitted.insert(field.clone()) {
            warn!(
                sheet = sheet_name,
                field = %field,
                "field name collides after sanitizing, skipping"
            );
            continue;
        }

        let _ = writeln!(out, "  {} {}", field, guess_type(&field));
    }

    out.push_str("  createdAt DateTime @default(now())\n");
    out.push_str("  updatedAt DateTime @updatedAt\n");
    let _ = writeln!(
        out,
        "\n  @@map(\"{}{}\")",
        config.table_prefix,
        table_name.to_lowercase()
    );
    if has_project_id {
        out.push_str("  @@index([projectId])\n");
    }
    out.push_str("}\n\n");
    out
}

/// Turn a raw field name into a Prisma identifier.
///
/// Returns `None` for blank names and for `id`, which every model declares itself.
pub fn sanitize_field_name(raw: &str) -> Option<String> {
    let field = raw.trim();
    if field.is_empty() || field.eq_ignore_ascii_case("id") {
        return None;
    }

    let field = if field.starts_with(|c: char| c.is_ascii_digit()) {
        format!("_{}", field)
    } else {
        field.to_string()
    };
    Some(INVALID_IDENT_CHARS.replace_all(&field, "_").into_owned())
}

/// Guess a Prisma column type from a sanitized field name
pub fn guess_type(field: &str) -> &'static str {
    if field == "projectId" {
        return "Int";
    }
    if field.ends_with("Id") {
        return "Int?";
    }
    if field.to_lowercase().contains("date") {
        return "String?";
    }
    if field.starts_with("is") {
        return "Boolean?";
    }
    "String?"
}
