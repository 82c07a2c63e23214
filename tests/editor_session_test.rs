use car_editor::{
    Car, CodecRegistry, ConsoleInput, ConsoleOutput, EditorConfig, InteractiveEditor,
    LocalStorage, PersistenceManager,
};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn run_script(
    manager: &PersistenceManager<LocalStorage>,
    open: &Path,
    script: &str,
) -> (Vec<Car>, String) {
    let input = ConsoleInput::new(script.as_bytes());
    let output = ConsoleOutput::new(Vec::new());
    let mut editor = InteractiveEditor::new(manager, input, output);

    let mut records = editor.open(open);
    editor.run(&mut records);

    let transcript = String::from_utf8(editor.into_output().into_inner()).unwrap();
    (records, transcript)
}

#[test]
fn test_load_edit_and_save_as_another_format() {
    let temp_dir = TempDir::new().unwrap();
    let source = temp_dir.path().join("cars.json");
    let target = temp_dir.path().join("cars.xml");
    fs::write(
        &source,
        r#"[{"brand":"Toyota","year":2010,"price":19999.99},{"brand":"Lada","year":1987,"price":1500.0}]"#,
    )
    .unwrap();

    let manager = PersistenceManager::new(LocalStorage::new());
    let script = format!("e\n1\n2\n2011\ns\n{}\nq\n", target.display());
    let (records, transcript) = run_script(&manager, &source, &script);

    assert_eq!(records[0], Car::new("Toyota", 2011, 19999.99));
    assert!(transcript.contains("Car 2:"));
    assert!(transcript.contains("as XML."), "transcript: {}", transcript);

    let reloaded = manager.load(&target);
    assert!(reloaded.is_ok());
    assert_eq!(reloaded.records, records);

    // Source file is untouched; nothing is saved implicitly.
    assert!(fs::read_to_string(&source).unwrap().contains("2010"));
}

#[test]
fn test_session_starts_empty_after_failed_load() {
    let temp_dir = TempDir::new().unwrap();
    let broken = temp_dir.path().join("broken.xml");
    fs::write(&broken, "<ArrayOfCar><Car>").unwrap();

    let manager = PersistenceManager::new(LocalStorage::new());
    let (records, transcript) = run_script(&manager, &broken, "q\n");

    assert!(records.is_empty());
    assert!(transcript.contains("The file is not valid XML"));
    assert!(transcript.contains("(none)"));
}

#[test]
fn test_configured_marker_is_used_for_text_saves() {
    let temp_dir = TempDir::new().unwrap();
    let source = temp_dir.path().join("cars.txt");
    let target = temp_dir.path().join("copy.txt");
    fs::write(&source, "Toyota\n2010\n19999.99\n").unwrap();

    let config = EditorConfig::from_toml_str("[formats]\ntext_marker = \"Машина\"\n").unwrap();
    let manager = PersistenceManager::with_registry(
        LocalStorage::new(),
        CodecRegistry::from_settings(&config.formats),
    );
    let script = format!("s\n{}\n", target.display());
    let (records, _) = run_script(&manager, &source, &script);

    assert_eq!(
        fs::read_to_string(&target).unwrap(),
        "Машина\nToyota\n2010\n19999.99\n"
    );
    assert_eq!(manager.load(&target).records, records);
}
