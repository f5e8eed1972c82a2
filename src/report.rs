use std::fmt::Write;
use std::path::Path;

use anyhow::Context;
use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::models::CourseNames;
use crate::overlap::OverlapMap;

pub const DEFAULT_AVATAR: &str = "default_avatar.png";
const TITLE: &str = "Course Roster Overlap with Avatars";

const STYLE: &str = "\
    body { font-family: Arial, sans-serif; margin: 20px; background-color: #f4f4f9; color: #333; }
    h1 { color: #333; text-align: center; font-size: 2em; margin-bottom: 30px; }
    .student-card { background-color: #ffffff; border: 1px solid #ddd; padding: 20px; border-radius: 8px; margin-bottom: 20px; box-shadow: 0 4px 8px rgba(0, 0, 0, 0.1); }
    .student { display: flex; align-items: center; margin-bottom: 10px; }
    .student img { width: 60px; height: 60px; border-radius: 50%; margin-right: 15px; }
    .student-name { font-size: 1.4em; font-weight: bold; color: #333; }
    .course-list { margin-left: 20px; }
    .course-list li { margin: 5px 0; color: #555; }";

pub fn build_report(course_names: &CourseNames, overlap: &OverlapMap) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "<!DOCTYPE html>");
    let _ = writeln!(output, "<html lang=\"en\">");
    let _ = writeln!(output, "<head>");
    let _ = writeln!(output, "  <meta charset=\"UTF-8\">");
    let _ = writeln!(
        output,
        "  <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">"
    );
    let _ = writeln!(output, "  <title>{}</title>", TITLE);
    let _ = writeln!(output, "  <style>");
    let _ = writeln!(output, "{}", STYLE);
    let _ = writeln!(output, "  </style>");
    let _ = writeln!(output, "</head>");
    let _ = writeln!(output, "<body>");
    let _ = writeln!(output, "  <h1>{}</h1>", TITLE);

    for (student, records) in overlap.iter() {
        // avatar comes from the first enrollment only
        let avatar = records
            .first()
            .and_then(|record| record.avatar_url.as_deref())
            .unwrap_or(DEFAULT_AVATAR);

        let _ = writeln!(output, "  <div class=\"student-card\">");
        let _ = writeln!(output, "    <div class=\"student\">");
        let _ = writeln!(
            output,
            "      <img src=\"{}\" alt=\"{} avatar\">",
            encode_double_quoted_attribute(avatar),
            encode_double_quoted_attribute(student)
        );
        let _ = writeln!(
            output,
            "      <span class=\"student-name\">{}</span>",
            encode_text(student)
        );
        let _ = writeln!(output, "    </div>");
        let _ = writeln!(output, "    <div class=\"course-list\">");
        let _ = writeln!(output, "      <p>Shared courses:</p>");
        let _ = writeln!(output, "      <ul>");

        for record in records {
            let course_name = course_names
                .get(&record.course_id)
                .map(String::as_str)
                .unwrap_or("");
            let _ = writeln!(
                output,
                "        <li>{} (Course ID: {})</li>",
                encode_text(course_name),
                record.course_id
            );
        }

        let _ = writeln!(output, "      </ul>");
        let _ = writeln!(output, "    </div>");
        let _ = writeln!(output, "  </div>");
    }

    let _ = writeln!(output, "</body>");
    let _ = writeln!(output, "</html>");

    output
}

/// Replaces any existing file at `path`.
pub fn write_report(path: &Path, report: &str) -> anyhow::Result<()> {
    std::fs::write(path, report)
        .with_context(|| format!("failed to write report to {}", path.display()))
}
