use crate::core::persistence::PersistenceManager;
use crate::core::{Car, CarField, LineInput, LineOutput, Storage};
use crate::utils::error::{EditorError, Result};
use crate::utils::validation::{parse_price, parse_year};
use std::path::Path;

/// Replace one field of `car` with the parsed `value`.
///
/// Brand takes the text verbatim. A year or price that does not parse leaves
/// the record untouched and returns [`EditorError::InvalidInput`].
pub fn apply_edit(car: &mut Car, field: CarField, value: &str) -> Result<()> {
    match field {
        CarField::Brand => car.brand = value.to_string(),
        CarField::Year => {
            car.year = parse_year(value)
                .ok_or_else(|| EditorError::invalid_input("year", value, "expected an integer"))?;
        }
        CarField::Price => {
            car.price = parse_price(value)
                .ok_or_else(|| EditorError::invalid_input("price", value, "expected a number"))?;
        }
    }
    Ok(())
}

/// Menu-driven session over a record collection.
///
/// All user interaction goes through the injected input and output ports.
pub struct InteractiveEditor<'a, S: Storage, I: LineInput, O: LineOutput> {
    persistence: &'a PersistenceManager<S>,
    input: I,
    output: O,
}

impl<'a, S: Storage, I: LineInput, O: LineOutput> InteractiveEditor<'a, S, I, O> {
    pub fn new(persistence: &'a PersistenceManager<S>, input: I, output: O) -> Self {
        Self {
            persistence,
            input,
            output,
        }
    }

    pub fn into_output(self) -> O {
        self.output
    }

    /// Show `prompt` and read one line; `None` when input is exhausted.
    pub fn prompt(&mut self, prompt: &str) -> Option<String> {
        self.output.write_line(prompt);
        self.input.read_line()
    }

    pub fn report_error(&mut self, error: &EditorError) {
        self.output
            .write_line(&format!("Error: {}", error.user_friendly_message()));
        self.output
            .write_line(&format!("Hint: {}", error.recovery_suggestion()));
    }

    /// Load the starting collection, reporting any failure and falling back to an
    /// empty list.
    pub fn open(&mut self, path: &Path) -> Vec<Car> {
        let outcome = self.persistence.load(path);
        if let Some(error) = &outcome.error {
            self.report_error(error);
        }
        outcome.records
    }

    pub fn display_records(&mut self, records: &[Car]) {
        self.output.write_line("Loaded cars:");
        if records.is_empty() {
            self.output.write_line("(none)");
        }
        for (i, car) in records.iter().enumerate() {
            self.output.write_line(&format!("Car {}:", i + 1));
            self.output.write_line(&car.to_string());
            self.output.write_line("");
        }
    }

    /// Run the main loop until the user quits or input runs out. Nothing is saved
    /// automatically.
    pub fn run(&mut self, records: &mut Vec<Car>) {
        loop {
            self.display_records(records);
            let Some(command) =
                self.prompt("Enter 's' to save, 'q' to quit, or anything else to edit a record:")
            else {
                break;
            };

            match command.trim() {
                "s" | "save" => self.save(records),
                "q" | "quit" => break,
                _ => self.edit(records),
            }
        }
        tracing::debug!("Editor session finished with {} records", records.len());
    }

    fn save(&mut self, records: &[Car]) {
        let Some(path) = self.prompt("Enter the path to save the file to:") else {
            return;
        };

        match self.persistence.save(records, Path::new(path.trim())) {
            Ok(receipt) => self.output.write_line(&format!(
                "Saved {} records to {} as {}.",
                receipt.records,
                receipt.path.display(),
                receipt.format
            )),
            Err(e) => {
                self.report_error(&e);
                self.output.write_line("The file was not saved.");
            }
        }
    }

    fn edit(&mut self, records: &mut [Car]) {
        if records.is_empty() {
            self.output.write_line("There are no records to edit.");
            return;
        }

        for (i, car) in records.iter().enumerate() {
            self.output.write_line(&format!("{}: {}", i + 1, car.brand));
        }
        let prompt = format!("Select a record to edit (1-{}):", records.len());
        let Some(selection) = self.prompt(&prompt) else {
            return;
        };

        match selection.trim().parse::<usize>() {
            Ok(n) if (1..=records.len()).contains(&n) => self.edit_record(&mut records[n - 1]),
            _ => self.output.write_line("Invalid choice."),
        }
    }

    fn edit_record(&mut self, car: &mut Car) {
        let Some(choice) =
            self.prompt("Select a field to edit (1: Brand, 2: Year, 3: Price, 0: Back):")
        else {
            return;
        };

        let field = match choice.trim().parse::<usize>() {
            Ok(0) => return,
            Ok(n) => CarField::from_menu_choice(n),
            Err(_) => None,
        };
        let Some(field) = field else {
            self.output.write_line("Invalid choice.");
            return;
        };

        let Some(value) = self.prompt(&format!("Enter new {}:", field.label())) else {
            return;
        };
        if let Err(e) = apply_edit(car, field, &value) {
            tracing::debug!("Rejected edit of {}: {}", field.label(), e);
            self.report_error(&e);
        }
    }
}
