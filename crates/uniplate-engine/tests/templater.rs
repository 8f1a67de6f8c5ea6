//! Integration tests for uniplate-engine
//!
//! Every test builds its template and table in memory, writes them to a
//! temporary directory and inspects the generated documents.

use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use tempfile::TempDir;
use uniplate_data::{DefaultTableLoader, FieldValue, LoadOptions, RowDictionary};
use uniplate_engine::{
    pipeline, DefaultTemplater, EngineError, RunConfig, Templater, TemplaterOptions,
};
use uniplate_odf::names::TEXT_P;
use uniplate_odf::test_utils::{
    graphics_bytes, graphics_with_master, graphics_with_paragraphs, spreadsheet_bytes,
};
use uniplate_odf::{element_text, DocumentKind, OdfDocument};

fn write(dir: &Path, name: &str, bytes: &[u8]) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, bytes).expect("Failed to write fixture");
    path
}

fn paragraphs(path: &Path) -> Vec<String> {
    let doc = OdfDocument::open(path, DocumentKind::Graphics).expect("Failed to open output");
    doc.content()
        .descendants(TEXT_P)
        .into_iter()
        .map(element_text)
        .collect()
}

fn output_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<_> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

fn row(fields: &[(&str, FieldValue)]) -> RowDictionary {
    fields.iter().cloned().collect()
}

fn pairs(items: &[(&str, &str)]) -> FieldValue {
    FieldValue::Pairs(
        items
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
    )
}

#[test]
fn test_template_file_substitutes_and_names() {
    let temp = TempDir::new().unwrap();
    let template = write(
        temp.path(),
        "card.odg",
        &graphics_with_paragraphs(&["Dear {name},", "{info::key::0}={info::value::0}", "{info::value::5}"]),
    );
    let outdir = temp.path().join("out");
    fs::create_dir(&outdir).unwrap();

    let mut templater = DefaultTemplater::new(TemplaterOptions::new(&template, &outdir, "{name}"));
    let path = templater
        .template_file(&row(&[
            ("name", FieldValue::from("Bob")),
            ("info", pairs(&[("name", "Bob"), ("age", "30")])),
        ]))
        .unwrap();

    assert_eq!(path, outdir.join("Bob.odg"));
    assert_eq!(paragraphs(&path), vec!["Dear Bob,", "name=Bob", ""]);
}

#[test]
fn test_fill_with_last() {
    let temp = TempDir::new().unwrap();
    let template = write(
        temp.path(),
        "card.odg",
        &graphics_with_paragraphs(&["{info::key::3}: {info::value::3}"]),
    );

    let options = TemplaterOptions::new(&template, temp.path(), "filled").with_fill_with_last(true);
    let mut templater = DefaultTemplater::new(options);
    let path = templater
        .template_file(&row(&[("info", pairs(&[("name", "Bob"), ("age", "30")]))]))
        .unwrap();

    assert_eq!(paragraphs(&path), vec!["age: 30"]);
}

#[test]
fn test_each_row_sees_pristine_template() {
    let temp = TempDir::new().unwrap();
    let template = write(temp.path(), "card.odg", &graphics_with_paragraphs(&["{name}"]));
    let outdir = temp.path().join("out");
    fs::create_dir(&outdir).unwrap();

    let mut templater = DefaultTemplater::new(TemplaterOptions::new(&template, &outdir, "{name}"));
    let first = templater
        .template_file(&row(&[("name", FieldValue::from("Ada"))]))
        .unwrap();
    let second = templater
        .template_file(&row(&[("name", FieldValue::from("Alan"))]))
        .unwrap();

    assert_eq!(paragraphs(&first), vec!["Ada"]);
    assert_eq!(paragraphs(&second), vec!["Alan"]);
    // The template itself is never modified
    assert_eq!(paragraphs(&template), vec!["{name}"]);
}

#[test]
fn test_collisions_get_suffixes() {
    let temp = TempDir::new().unwrap();
    let template = write(temp.path(), "card.odg", &graphics_with_paragraphs(&["{n}"]));
    let outdir = temp.path().join("out");
    fs::create_dir(&outdir).unwrap();
    fs::write(outdir.join("Name.odg"), b"existing").unwrap();
    fs::write(outdir.join("Name_1.odg"), b"existing").unwrap();

    let mut templater = DefaultTemplater::new(TemplaterOptions::new(&template, &outdir, "{n}"));
    let path = templater
        .template_file(&row(&[("n", FieldValue::from("Name"))]))
        .unwrap();

    assert_eq!(path, outdir.join("Name_2.odg"));
    assert_eq!(fs::read(outdir.join("Name.odg")).unwrap(), b"existing");
}

#[test]
fn test_master_page_paragraphs_are_substituted() {
    let temp = TempDir::new().unwrap();
    let template = write(
        temp.path(),
        "card.odg",
        &graphics_with_master(
            "<draw:page><text:p>{title}</text:p></draw:page>",
            Some(r#"<style:master-page style:name="Default"><draw:frame><draw:text-box><text:p>Issued by {org}</text:p></draw:text-box></draw:frame></style:master-page>"#),
        ),
    );

    let saved: Rc<RefCell<Vec<OdfDocument>>> = Rc::default();
    let sink = Rc::clone(&saved);
    let mut templater = DefaultTemplater::new(TemplaterOptions::new(&template, temp.path(), "x"))
        .with_save_callback(Box::new(move |doc: &OdfDocument, _path: &Path| -> uniplate_engine::Result<()> {
            sink.borrow_mut().push(doc.clone());
            Ok(())
        }));

    templater
        .template_file(&row(&[
            ("title", FieldValue::from("Certificate")),
            ("org", FieldValue::from("Acme")),
        ]))
        .unwrap();

    let saved = saved.borrow();
    assert_eq!(saved.len(), 1);
    let styles = saved[0].styles().unwrap();
    assert_eq!(element_text(styles.descendants(TEXT_P)[0]), "Issued by Acme");
    assert_eq!(element_text(saved[0].content().descendants(TEXT_P)[0]), "Certificate");
}

#[test]
fn test_save_callback_receives_path_and_nothing_is_written() {
    let temp = TempDir::new().unwrap();
    let template = write(temp.path(), "card.odg", &graphics_with_paragraphs(&["{a}"]));
    let outdir = temp.path().join("out");
    fs::create_dir(&outdir).unwrap();

    let paths: Rc<RefCell<Vec<PathBuf>>> = Rc::default();
    let sink = Rc::clone(&paths);
    let mut templater = DefaultTemplater::new(TemplaterOptions::new(&template, &outdir, "{a}-{b}"))
        .with_save_callback(Box::new(move |_doc: &OdfDocument, path: &Path| -> uniplate_engine::Result<()> {
            sink.borrow_mut().push(path.to_path_buf());
            Ok(())
        }));

    templater
        .template_file(&row(&[("a", FieldValue::from("1"))]))
        .unwrap();

    // Unknown fields stay as literal tokens in the name
    assert_eq!(*paths.borrow(), vec![outdir.join("1-{b}.odg")]);
    assert!(output_names(&outdir).is_empty());
}

/// Drops every paragraph mentioning `{optional}` unless the row has it
struct PruningTemplater {
    inner: DefaultTemplater,
}

impl Templater for PruningTemplater {
    fn options(&self) -> &TemplaterOptions {
        self.inner.options()
    }

    fn save(&mut self, document: &OdfDocument, path: &Path) -> uniplate_engine::Result<()> {
        self.inner.save(document, path)
    }

    fn preprocess_file(
        &mut self,
        document: &mut OdfDocument,
        row: &RowDictionary,
    ) -> uniplate_engine::Result<()> {
        if !row.contains("optional") {
            document.remove_elements(|e| {
                e.name == TEXT_P && element_text(e).contains("{optional}")
            });
        }
        Ok(())
    }
}

#[test]
fn test_preprocess_hook_runs_before_substitution() {
    let temp = TempDir::new().unwrap();
    let template = write(
        temp.path(),
        "card.odg",
        &graphics_with_paragraphs(&["{name}", "extra: {optional}"]),
    );

    let mut templater = PruningTemplater {
        inner: DefaultTemplater::new(TemplaterOptions::new(&template, temp.path(), "{name}")),
    };
    let without = templater
        .template_file(&row(&[("name", FieldValue::from("plain"))]))
        .unwrap();
    let with = templater
        .template_file(&row(&[
            ("name", FieldValue::from("full")),
            ("optional", FieldValue::from("yes")),
        ]))
        .unwrap();

    assert_eq!(paragraphs(&without), vec!["plain"]);
    assert_eq!(paragraphs(&with), vec!["full", "extra: yes"]);
}

fn default_templater(options: TemplaterOptions) -> Box<dyn Templater> {
    Box::new(DefaultTemplater::new(options))
}

#[test]
fn test_pipeline_run() {
    let temp = TempDir::new().unwrap();
    let template = write(
        temp.path(),
        "card.odg",
        &graphics_with_paragraphs(&["{name} ({org})"]),
    );
    let table = write(
        temp.path(),
        "people.ods",
        &spreadsheet_bytes(&[
            ("Sheet1", vec![vec!["name"], vec!["Skipped"]]),
            ("Sheet2", vec![vec!["name"], vec!["Ada"], vec!["Ada"], vec!["Alan"]]),
            ("uniplate_globals", vec![vec!["org"], vec!["Acme"]]),
        ]),
    );
    let outdir = temp.path().join("out");
    fs::create_dir(&outdir).unwrap();

    let config = RunConfig {
        template,
        table,
        outdir: outdir.clone(),
        load: LoadOptions {
            sheets: vec!["Sheet2".to_string()],
            ..Default::default()
        },
    };
    let summary = pipeline::run(&config, &DefaultTableLoader, default_templater).unwrap();

    assert_eq!(summary.written.len(), 3);
    assert_eq!(output_names(&outdir), vec!["Ada.odg", "Ada_1.odg", "Alan.odg"]);
    assert_eq!(paragraphs(&outdir.join("Ada_1.odg")), vec!["Ada (Acme)"]);
}

#[test]
fn test_pipeline_non_container_table_is_fatal() {
    let temp = TempDir::new().unwrap();
    let template = write(temp.path(), "card.odg", &graphics_with_paragraphs(&["{a}"]));
    let table = write(temp.path(), "table.ods", b"a,b\n1,2\n");
    let outdir = temp.path().join("out");
    fs::create_dir(&outdir).unwrap();

    let config = RunConfig {
        template,
        table,
        outdir: outdir.clone(),
        load: LoadOptions::default(),
    };
    let err = pipeline::run(&config, &DefaultTableLoader, default_templater).unwrap_err();

    assert!(matches!(err, EngineError::Table { .. }));
    assert!(err.to_string().contains("table.ods"));
    assert!(output_names(&outdir).is_empty());
}

#[test]
fn test_pipeline_wrong_template_kind_is_fatal() {
    let temp = TempDir::new().unwrap();
    let template = write(
        temp.path(),
        "card.odg",
        &spreadsheet_bytes(&[("S", vec![vec!["a"]])]),
    );
    let table = write(
        temp.path(),
        "table.ods",
        &spreadsheet_bytes(&[("S", vec![vec!["a"], vec!["1"], vec!["2"]])]),
    );
    let outdir = temp.path().join("out");
    fs::create_dir(&outdir).unwrap();

    let config = RunConfig {
        template,
        table,
        outdir: outdir.clone(),
        load: LoadOptions::default(),
    };
    let err = pipeline::run(&config, &DefaultTableLoader, default_templater).unwrap_err();

    assert!(matches!(err, EngineError::Template { .. }));
    assert!(output_names(&outdir).is_empty());
}

#[test]
fn test_pipeline_missing_outdir() {
    let temp = TempDir::new().unwrap();
    let template = write(temp.path(), "card.odg", &graphics_bytes("<draw:page/>"));
    let config = RunConfig {
        template: template.clone(),
        table: template,
        outdir: temp.path().join("missing"),
        load: LoadOptions::default(),
    };
    let err = pipeline::run(&config, &DefaultTableLoader, default_templater).unwrap_err();
    assert!(matches!(err, EngineError::NotADirectory(_)));
}
