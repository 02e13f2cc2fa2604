use anyhow::Result;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

pub const LOG_HEADER: &str = "ID\tBUSINESS_APPLICATION_NAME\tBATCH_JOB_ID\tUSER_ID\tWHEN_CREATED\tCOMPLETED_TIMESTAMP\tNUM_SUBMITTED_REQUESTS\tFAILED_REQUEST_RANGE\tINPUT_DATA_CONTENT_TYPE\tRESULT_DATA_CONTENT_TYPE";

/// One log row in the daily TSV shape. `num` stays a string so tests can
/// inject non-numeric job sizes.
pub fn log_line(id: u32, user: &str, when: &str, num: &str) -> String {
    format!("{id}\tgeocoder\tbatch-{id}\t{user}\t{when}\t{when}\t{num}\t\ttext/csv\ttext/csv")
}

/// Build a ZIP log package with one TSV per day under `jobs/`, mirroring the
/// production packaging.
pub fn create_log_archive(dir: &Path, days: &[(&str, Vec<String>)]) -> Result<PathBuf> {
    let archive_path = dir.join("logs.zip");
    let file = File::create(&archive_path)?;
    let mut zip = ZipWriter::new(file);
    let options = SimpleFileOptions::default();

    for (day, lines) in days {
        zip.start_file(format!("jobs/{day}.tsv"), options)?;
        writeln!(zip, "{LOG_HEADER}")?;
        for line in lines {
            writeln!(zip, "{line}")?;
        }
    }

    zip.finish()?;
    Ok(archive_path)
}

/// Write the user directory lookup table.
pub fn create_lookup_table(dir: &Path, rows: &[[&str; 4]]) -> Result<PathBuf> {
    let path = dir.join("users.csv");
    let mut content = String::from("USER_ID,User_Name,Email,Org\n");
    for [id, name, email, org] in rows {
        content.push_str(&format!("{id},{name},{email},{org}\n"));
    }
    std::fs::write(&path, content)?;
    Ok(path)
}
