//! Printable cover-sheet rendering.

use std::path::PathBuf;

use anyhow::{Context, Result};
use async_trait::async_trait;

use crate::domains::records::Record;
use crate::kernel::BaseDocumentRenderer;

/// Writes a self-contained HTML print sheet per record under a base
/// directory, named `expediente_<id>_<digital number with - as _>.html`.
/// Regenerated on every mutation except note creation, so the file always
/// reflects the latest state.
pub struct HtmlDocumentRenderer {
    base_dir: PathBuf,
}

impl HtmlDocumentRenderer {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    fn filename_for(record: &Record) -> String {
        format!(
            "expediente_{}_{}.html",
            record.id,
            record.digital_number.replace('-', "_")
        )
    }

    fn render_html(record: &Record, department_name: &str) -> String {
        let field = |label: &str, value: &str| {
            format!(
                "    <tr><th>{}</th><td>{}</td></tr>\n",
                escape(label),
                escape(value)
            )
        };
        let mut rows = String::new();
        rows.push_str(&field("Número digital", &record.digital_number));
        rows.push_str(&field("Solicitante", &record.full_name));
        if let Some(dni) = &record.dni {
            rows.push_str(&field("DNI", dni));
        }
        if let Some(address) = &record.address {
            rows.push_str(&field("Domicilio", address));
        }
        if let Some(phone) = &record.phone {
            rows.push_str(&field("Teléfono", phone));
        }
        if let Some(email) = &record.email {
            rows.push_str(&field("Email", email));
        }
        if let Some(date) = record.transaction_date {
            rows.push_str(&field("Fecha de trámite", &date.format("%d/%m/%Y %H:%M").to_string()));
        }
        if let Some(description) = &record.description {
            rows.push_str(&field("Descripción", description));
        }
        rows.push_str(&field("Departamento", department_name));
        rows.push_str(&field("Estado", &record.status));

        format!(
            r#"<!DOCTYPE html>
<html lang="es">
<head>
<meta charset="utf-8">
<title>Expediente {dn}</title>
<style>
  body {{ font-family: sans-serif; margin: 2em; }}
  table {{ border-collapse: collapse; width: 100%; }}
  th, td {{ border: 1px solid #444; padding: 0.4em 0.8em; text-align: left; }}
  th {{ width: 12em; background: #eee; }}
</style>
</head>
<body>
  <h1>Expediente {dn}</h1>
  <table>
{rows}  </table>
</body>
</html>
"#,
            dn = escape(&record.digital_number),
            rows = rows
        )
    }
}

#[async_trait]
impl BaseDocumentRenderer for HtmlDocumentRenderer {
    async fn render(&self, record: &Record, department_name: &str) -> Result<String> {
        tokio::fs::create_dir_all(&self.base_dir)
            .await
            .with_context(|| format!("creando directorio {}", self.base_dir.display()))?;
        let filename = Self::filename_for(record);
        let path = self.base_dir.join(&filename);
        let html = Self::render_html(record, department_name);
        tokio::fs::write(&path, html)
            .await
            .with_context(|| format!("escribiendo documento {}", path.display()))?;
        Ok(filename)
    }
}

fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    use crate::common::Id;

    fn sample_record() -> Record {
        Record {
            id: Id::from_i64(3),
            sequence_number: 7,
            digital_number: "OP-0007-01-03-2024".into(),
            full_name: "Juan <Pérez>".into(),
            dni: Some("12345678".into()),
            address: None,
            phone: None,
            email: None,
            transaction_date: None,
            description: Some("Reclamo de luminaria".into()),
            attachment_filename: None,
            generated_doc_filename: None,
            status: "pending".into(),
            department_id: Id::from_i64(5),
            created_by: Id::from_i64(1),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn filename_replaces_hyphens() {
        assert_eq!(
            HtmlDocumentRenderer::filename_for(&sample_record()),
            "expediente_3_OP_0007_01_03_2024.html"
        );
    }

    #[tokio::test]
    async fn render_writes_an_escaped_sheet() {
        let dir = tempfile::tempdir().unwrap();
        let renderer = HtmlDocumentRenderer::new(dir.path());
        let name = renderer
            .render(&sample_record(), "Obras Públicas")
            .await
            .unwrap();
        let html = tokio::fs::read_to_string(dir.path().join(&name)).await.unwrap();
        assert!(html.contains("Juan &lt;Pérez&gt;"));
        assert!(html.contains("Obras Públicas"));
        assert!(!html.contains("<Pérez>"));
    }
}
