//! Score report generation: a point-in-time snapshot rendered into a fixed
//! HTML document and written out as the export artifact.

use crate::scoring::session::SessionSnapshot;
use chrono::{DateTime, Local};
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("select a state before exporting a report")]
    NoStateSelected,
    #[error("failed to write report file: {0}")]
    Io(#[from] std::io::Error),
}

/// A derived, non-stored report over one session snapshot.
#[derive(Debug)]
pub struct ScoreReport {
    snapshot: SessionSnapshot,
    generated_at: DateTime<Local>,
}

impl ScoreReport {
    /// Build a report from a snapshot. Fails when no state has been selected
    /// yet; nothing else can go wrong before the file write.
    pub fn from_snapshot(
        snapshot: SessionSnapshot,
        generated_at: DateTime<Local>,
    ) -> Result<Self, ReportError> {
        if snapshot.location.state.is_none() {
            return Err(ReportError::NoStateSelected);
        }
        Ok(Self {
            snapshot,
            generated_at,
        })
    }

    /// Export filename: state name with spaces replaced, plus the date.
    pub fn file_name(&self) -> String {
        let state = self
            .snapshot
            .location
            .state
            .as_deref()
            .unwrap_or_default()
            .replace(' ', "_");
        format!(
            "LIHTC_QAP_Score_Report_{}_{}.html",
            state,
            self.generated_at.format("%Y-%m-%d")
        )
    }

    /// Render the fixed report document.
    pub fn render_html(&self) -> String {
        let snapshot = &self.snapshot;
        let percentage = snapshot.score_percentage;
        let summary_background = if percentage >= 80.0 {
            "#dcf5e7"
        } else if percentage >= 60.0 {
            "#fff8e1"
        } else {
            "#fee2e2"
        };

        let mut rows = String::new();
        for category in &snapshot.categories {
            let category_pct = if category.max_points == 0 {
                0.0
            } else {
                f64::from(category.current_points) / f64::from(category.max_points) * 100.0
            };
            let _ = write!(
                rows,
                "<tr>\
                 <td style=\"padding: 10px; border: 1px solid #ddd;\">{}</td>\
                 <td style=\"padding: 10px; text-align: center; border: 1px solid #ddd;\">{}</td>\
                 <td style=\"padding: 10px; text-align: center; border: 1px solid #ddd;\">{}</td>\
                 <td style=\"padding: 10px; text-align: center; border: 1px solid #ddd;\">{:.1}%</td>\
                 </tr>",
                category.name, category.current_points, category.max_points, category_pct
            );
        }

        let field = |value: &Option<String>| -> String {
            value.clone().unwrap_or_else(|| "Not specified".to_string())
        };

        format!(
            r#"<!DOCTYPE html>
<html>
<body style="font-family: Arial, sans-serif; width: 800px; padding: 40px; background-color: white; color: black;">
  <div style="display: flex; justify-content: space-between; align-items: center; margin-bottom: 20px;">
    <h1 style="color: #0f4c81; margin: 0;">LIHTC QAP Score Report</h1>
    <div style="font-size: 14px; text-align: right;">
      <p style="margin: 0; color: #666;">Generated: {generated}</p>
    </div>
  </div>
  <div style="background-color: #f7fafc; padding: 20px; border-radius: 5px; margin-bottom: 30px;">
    <h2 style="margin-top: 0; color: #0f4c81;">Location Information</h2>
    <p><strong>State:</strong> {state}</p>
    <p><strong>City:</strong> {city}</p>
    <p><strong>Zip Code:</strong> {zip}</p>
    <p><strong>Address:</strong> {address}</p>
  </div>
  <div style="margin-bottom: 30px;">
    <h2 style="color: #0f4c81;">Summary</h2>
    <div style="background-color: {summary_background}; padding: 15px; border-radius: 5px; text-align: center;">
      <h3 style="margin: 0; font-size: 24px;">Overall Score: {percentage:.1}%</h3>
      <p style="margin: 5px 0 0;">Total Points: {total} of {max_total}</p>
    </div>
  </div>
  <h2 style="color: #0f4c81;">Detailed Scoring Breakdown</h2>
  <table style="width: 100%; border-collapse: collapse; margin-bottom: 30px;">
    <thead>
      <tr style="background-color: #0f4c81; color: white;">
        <th style="padding: 10px; text-align: left; border: 1px solid #ddd;">Category</th>
        <th style="padding: 10px; text-align: center; border: 1px solid #ddd;">Score</th>
        <th style="padding: 10px; text-align: center; border: 1px solid #ddd;">Max Points</th>
        <th style="padding: 10px; text-align: center; border: 1px solid #ddd;">Percentage</th>
      </tr>
    </thead>
    <tbody>{rows}</tbody>
    <tfoot>
      <tr style="background-color: #f2f2f2; font-weight: bold;">
        <td style="padding: 10px; border: 1px solid #ddd;">Total</td>
        <td style="padding: 10px; text-align: center; border: 1px solid #ddd;">{total}</td>
        <td style="padding: 10px; text-align: center; border: 1px solid #ddd;">{max_total}</td>
        <td style="padding: 10px; text-align: center; border: 1px solid #ddd;">{percentage:.1}%</td>
      </tr>
    </tfoot>
  </table>
  <div style="font-size: 12px; color: #666; border-top: 1px solid #ddd; padding-top: 20px;">
    <p>This report was automatically generated by the LIHTC QAP Score Calculator.</p>
    <p>The information provided is based on user input and should be verified with official scoring criteria.</p>
  </div>
</body>
</html>
"#,
            generated = self.generated_at.format("%Y-%m-%d %H:%M:%S"),
            state = field(&snapshot.location.state),
            city = field(&snapshot.location.city),
            zip = field(&snapshot.location.zip_code),
            address = field(&snapshot.location.address),
            summary_background = summary_background,
            percentage = percentage,
            total = snapshot.total_score,
            max_total = snapshot.total_max_points,
            rows = rows,
        )
    }

    /// Write the rendered report into `dir`, returning the full path.
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf, ReportError> {
        let path = dir.join(self.file_name());
        fs::write(&path, self.render_html())?;
        Ok(path)
    }
}
