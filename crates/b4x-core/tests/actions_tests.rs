//! Integration tests for build actions and variable expansion

use std::fs;
use std::io::Read;

use b4x_core::actions::{
    checksum_file, copy_jar, copy_path, move_backups, replace_in_file, update_version,
    write_build_stamp, zip_path,
};
use b4x_core::{ActionContext, ActionsConfig, BuildSection, Error};
use b4x_fs::ProjectLayout;
use b4x_test_utils::project::TestProject;
use chrono::{NaiveDate, NaiveDateTime};
use pretty_assertions::assert_eq;

fn fixed_now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 3, 7)
        .unwrap()
        .and_hms_opt(14, 5, 9)
        .unwrap()
}

fn context(project: &TestProject) -> ActionContext {
    let layout = ProjectLayout::new(project.objects()).unwrap();
    ActionContext::new(layout, fixed_now())
}

fn zip_names(path: &std::path::Path) -> Vec<String> {
    let mut archive = zip::ZipArchive::new(fs::File::open(path).unwrap()).unwrap();
    let mut names: Vec<String> = (0..archive.len())
        .map(|i| archive.by_index(i).unwrap().name().to_string())
        .collect();
    names.sort();
    names
}

// ============================================================================
// Variables
// ============================================================================

#[test]
fn test_expands_all_variables() {
    let project = TestProject::new("MyApp");
    project.write_file("Files/version.txt", "1.2.3\n");
    project.write_file("Objects/MyApp.jar", "jar");
    let ctx = context(&project);

    let expanded = ctx
        .expand("%PROJECT_NAME%-%VERSION% %DATE% %TIME% %JAR% %JAR_NAME%")
        .unwrap();

    assert_eq!(expanded, "MyApp-1.2.3 20240307 140509 MyApp.jar MyApp");
}

#[test]
fn test_missing_version_file_expands_to_empty() {
    let project = TestProject::new("MyApp");
    assert_eq!(context(&project).expand("v%VERSION%").unwrap(), "v");
}

#[test]
fn test_jar_variable_without_jar_is_an_error() {
    let project = TestProject::new("MyApp");
    let err = context(&project).expand("%JAR_NAME%.exe").unwrap_err();
    assert!(matches!(err, Error::MissingJar { ref variable, .. } if variable == "%JAR_NAME%"));
}

#[test]
fn test_text_without_variables_is_unchanged() {
    let project = TestProject::new("MyApp");
    assert_eq!(context(&project).expand("100% done").unwrap(), "100% done");
}

#[test]
fn test_project_name_is_unknown_without_project_file() {
    let project = TestProject::bare();
    assert_eq!(context(&project).expand("%PROJECT_NAME%").unwrap(), "unknown");
}

// ============================================================================
// Build stamp and version
// ============================================================================

#[test]
fn test_build_stamp_uses_default_formats() {
    let project = TestProject::new("MyApp");
    let stamp = write_build_stamp(&context(&project), None, None).unwrap();

    assert_eq!(stamp.text, "2024-03-07 14:05:09");
    assert_eq!(project.read_file("Files/build.txt"), "2024-03-07 14:05:09");
}

#[test]
fn test_build_stamp_formats_come_from_flags_then_config() {
    let project = TestProject::new("MyApp");
    let config = ActionsConfig {
        build: BuildSection {
            date_format: "dd/MM/yyyy".into(),
            time_format: "HH:mm".into(),
        },
        ..ActionsConfig::default()
    };
    let ctx = context(&project).with_config(config);

    assert_eq!(write_build_stamp(&ctx, None, None).unwrap().text, "07/03/2024 14:05");
    assert_eq!(
        write_build_stamp(&ctx, Some("yyyyMMdd"), None).unwrap().text,
        "20240307 14:05"
    );
}

#[test]
fn test_version_file_is_created_then_bumped() {
    let project = TestProject::new("MyApp");
    let ctx = context(&project);

    let first = update_version(&ctx).unwrap();
    assert_eq!(first.previous, None);
    assert_eq!(project.read_file("Files/version.txt"), "0.0.1");

    project.write_file("Files/version.txt", "1.9.9");
    let bump = update_version(&ctx).unwrap();
    assert_eq!(bump.current.to_string(), "2.0.0");
    assert_eq!(project.read_file("Files/version.txt"), "2.0.0");
}

#[test]
fn test_malformed_version_is_left_alone() {
    let project = TestProject::new("MyApp");
    project.write_file("Files/version.txt", "release");

    assert!(matches!(
        update_version(&context(&project)),
        Err(Error::InvalidVersion { .. })
    ));
    assert_eq!(project.read_file("Files/version.txt"), "release");
}

// ============================================================================
// Copy
// ============================================================================

#[test]
fn test_copy_appends_source_name_to_destination_folder() {
    let project = TestProject::new("MyApp");
    project.write_file("Objects/MyApp.jar", "jar");
    let out = project.outside("release");

    let outcome = copy_path(&context(&project), "MyApp.jar", out.to_str().unwrap()).unwrap();

    assert_eq!(outcome.files, 1);
    assert_eq!(fs::read_to_string(out.join("MyApp.jar")).unwrap(), "jar");
}

#[test]
fn test_copy_keeps_destination_naming_the_source() {
    let project = TestProject::new("MyApp");
    project.write_file("Files/readme.txt", "hello");

    copy_path(&context(&project), "Files/readme.txt", "Objects/readme.txt").unwrap();

    assert_eq!(project.read_file("Objects/readme.txt"), "hello");
}

#[test]
fn test_copy_directory_recursively_and_overwrites() {
    let project = TestProject::new("MyApp");
    project.write_file("Files/assets/a.txt", "a");
    project.write_file("Files/assets/img/b.png", "b");
    let out = project.outside("dist");
    fs::create_dir_all(out.join("assets")).unwrap();
    fs::write(out.join("assets/a.txt"), "stale").unwrap();

    let outcome = copy_path(&context(&project), "Files/assets", out.to_str().unwrap()).unwrap();

    assert_eq!(outcome.files, 2);
    assert_eq!(fs::read_to_string(out.join("assets/a.txt")).unwrap(), "a");
    assert!(out.join("assets/img/b.png").is_file());
}

#[test]
fn test_copy_expands_variables_in_paths() {
    let project = TestProject::new("MyApp");
    project.write_file("Files/version.txt", "2.0.1");
    project.write_file("Objects/MyApp.jar", "jar");
    let out = project.outside("out");
    let destination = format!("{}/%PROJECT_NAME%-%VERSION%", out.display());

    copy_path(&context(&project), "%JAR%", &destination).unwrap();

    assert!(out.join("MyApp-2.0.1/MyApp.jar").is_file());
}

#[test]
fn test_copy_missing_source_is_an_error() {
    let project = TestProject::new("MyApp");
    let err = copy_path(&context(&project), "nope.jar", "Files").unwrap_err();
    assert!(matches!(err, Error::SourceNotFound { .. }));
}

#[test]
fn test_copy_directory_into_itself_is_refused() {
    let project = TestProject::new("MyApp");
    project.write_file("Files/a.txt", "a");

    let err = copy_path(&context(&project), "Files", "Files/out").unwrap_err();

    assert!(matches!(err, Error::Fs(b4x_fs::Error::CopyIntoSource { .. })));
    project.assert_file_not_exists("Files/out");
}

#[test]
fn test_copy_jar_copies_first_jar() {
    let project = TestProject::new("MyApp");
    project.write_file("Objects/b.jar", "b");
    project.write_file("Objects/a.jar", "a");
    let out = project.outside("jars");

    let outcome = copy_jar(&context(&project), out.to_str().unwrap()).unwrap().unwrap();

    assert!(outcome.destination.as_str().ends_with("jars/a.jar"));
    assert_eq!(fs::read_to_string(out.join("a.jar")).unwrap(), "a");
}

#[test]
fn test_copy_jar_without_jar_does_nothing() {
    let project = TestProject::new("MyApp");
    let out = project.outside("jars");
    assert!(copy_jar(&context(&project), out.to_str().unwrap()).unwrap().is_none());
}

// ============================================================================
// Zip
// ============================================================================

#[test]
fn test_zip_file_into_derived_archive_name() {
    let project = TestProject::new("MyApp");
    project.write_file("Objects/MyApp.jar", "jar");
    let out = project.outside("zips");

    let outcome = zip_path(&context(&project), "MyApp.jar", out.to_str().unwrap()).unwrap();

    assert!(outcome.archive.as_str().ends_with("zips/MyApp.zip"));
    assert_eq!(zip_names(&out.join("MyApp.zip")), vec!["MyApp.jar"]);
}

#[test]
fn test_zip_directory_to_named_archive_replacing_old_one() {
    let project = TestProject::new("MyApp");
    project.write_file("Files/web/index.html", "<html>");
    project.write_file("Files/web/css/site.css", "body {}");
    let out = project.outside("zips");
    fs::write(out.join("site.zip"), "not a zip").unwrap();
    let destination = format!("{}/site.zip", out.display());

    let outcome = zip_path(&context(&project), "Files/web", &destination).unwrap();

    assert_eq!(outcome.entries, 2);
    assert_eq!(zip_names(&out.join("site.zip")), vec!["css/site.css", "index.html"]);

    let mut archive = zip::ZipArchive::new(fs::File::open(out.join("site.zip")).unwrap()).unwrap();
    let mut content = String::new();
    archive
        .by_name("index.html")
        .unwrap()
        .read_to_string(&mut content)
        .unwrap();
    assert_eq!(content, "<html>");
}

// ============================================================================
// Backup
// ============================================================================

#[test]
fn test_backups_are_moved_out_of_the_project() {
    let project = TestProject::new("MyApp");
    project.write_file("AutoBackups/MyApp-1.zip", "one");
    project.write_file("AutoBackups/MyApp-2.zip", "two");
    project.write_file("AutoBackups/notes.txt", "keep");
    let out = project.outside("backups");

    let outcome = move_backups(&context(&project), out.to_str().unwrap(), None).unwrap();

    assert_eq!(outcome.moved.len(), 2);
    assert!(out.join("MyApp-1.zip").is_file());
    project.assert_file_not_exists("AutoBackups/MyApp-1.zip");
    project.assert_file_exists("AutoBackups/notes.txt");
}

#[test]
fn test_missing_default_backup_folder_moves_nothing() {
    let project = TestProject::new("MyApp");
    let out = project.outside("backups");

    let outcome = move_backups(&context(&project), out.to_str().unwrap(), None).unwrap();
    assert!(outcome.moved.is_empty());
}

#[test]
fn test_missing_explicit_backup_folder_is_an_error() {
    let project = TestProject::new("MyApp");
    let out = project.outside("backups");

    let result = move_backups(&context(&project), out.to_str().unwrap(), Some("Files/none"));
    assert!(matches!(result, Err(Error::SourceNotFound { .. })));
}

// ============================================================================
// Replace and checksum
// ============================================================================

#[test]
fn test_replace_expands_variables_and_literal_text() {
    let project = TestProject::new("MyApp");
    project.write_file("Files/version.txt", "1.0.4");
    project.write_file("Files/about.txt", "App %PROJECT_NAME% version VERSION_HERE");

    let outcome = replace_in_file(
        &context(&project),
        "Files/about.txt",
        Some("VERSION_HERE"),
        Some("%VERSION%"),
    )
    .unwrap();

    assert!(outcome.changed);
    assert_eq!(project.read_file("Files/about.txt"), "App MyApp version 1.0.4");
}

#[test]
fn test_replace_without_matches_does_not_rewrite() {
    let project = TestProject::new("MyApp");
    let path = project.write_file("Files/plain.txt", "nothing here");
    let before = fs::metadata(&path).unwrap().modified().unwrap();

    let outcome = replace_in_file(&context(&project), "Files/plain.txt", None, None).unwrap();

    assert!(!outcome.changed);
    assert_eq!(fs::metadata(&path).unwrap().modified().unwrap(), before);
}

#[test]
fn test_replace_rejects_empty_search() {
    let project = TestProject::new("MyApp");
    project.write_file("Files/plain.txt", "text");

    let result = replace_in_file(&context(&project), "Files/plain.txt", Some(""), Some("x"));
    assert!(matches!(result, Err(Error::MissingSetting { .. })));
}

#[test]
fn test_checksum_is_printed_and_written_next_to_release() {
    let project = TestProject::new("MyApp");
    project.write_file("Objects/MyApp.jar", "hello world\n");
    let out = project.outside("release");

    let outcome =
        checksum_file(&context(&project), "MyApp.jar", Some(out.to_str().unwrap())).unwrap();

    let expected = "a948904f2f0f479b8f8197694b30184b0d2ed1c1cd2a1ec0fb85d299a192a447";
    assert_eq!(outcome.hex, expected);
    assert_eq!(
        fs::read_to_string(out.join("MyApp.jar.sha256")).unwrap(),
        format!("{expected}  MyApp.jar\n")
    );
}

#[test]
fn test_checksum_without_destination_writes_nothing() {
    let project = TestProject::new("MyApp");
    project.write_file("Objects/empty.bin", "");

    let outcome = checksum_file(&context(&project), "empty.bin", None).unwrap();

    assert_eq!(
        outcome.hex,
        "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
    );
    assert!(outcome.written.is_none());
}
