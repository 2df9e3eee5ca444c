use std::path::PathBuf;

/// The two inputs the user is asked for at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Spreadsheet,
    Video,
}

impl FileKind {
    pub fn title(self) -> &'static str {
        match self {
            FileKind::Spreadsheet => "Select the Excel file with displacement vs load data",
            FileKind::Video => "Select the slow-motion video file",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            FileKind::Spreadsheet => "Excel Files",
            FileKind::Video => "Video Files",
        }
    }

    pub fn extensions(self) -> &'static [&'static str] {
        match self {
            FileKind::Spreadsheet => &["xlsx", "xlsm", "xlsb", "xls", "ods", "csv"],
            FileKind::Video => &["mp4", "avi", "mov", "mkv"],
        }
    }
}

/// Shows a native open dialog. `None` means the user cancelled.
pub fn pick_file(kind: FileKind) -> Option<PathBuf> {
    log::info!("{}:", kind.title());

    let picked = rfd::FileDialog::new()
        .set_title(kind.title())
        .add_filter(kind.description(), kind.extensions())
        .add_filter("All files", &["*"])
        .pick_file();

    match &picked {
        Some(path) => log::info!("Selected {}", path.display()),
        None => log::info!("No {} selected", kind.description().to_lowercase()),
    }
    picked
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spreadsheet_filter_covers_excel_and_csv() {
        let exts = FileKind::Spreadsheet.extensions();
        assert!(exts.contains(&"xlsx"));
        assert!(exts.contains(&"xls"));
        assert!(exts.contains(&"csv"));
    }

    #[test]
    fn test_video_filter_covers_common_containers() {
        for ext in ["mp4", "avi", "mov"] {
            assert!(FileKind::Video.extensions().contains(&ext), "missing {}", ext);
        }
    }

    #[test]
    fn test_kinds_have_distinct_titles() {
        assert_ne!(FileKind::Spreadsheet.title(), FileKind::Video.title());
    }
}
