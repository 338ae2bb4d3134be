use anyhow::Result;
use derive_more::Display;
use inquire::{Confirm, InquireError, Password, PasswordDisplayMode, Select, Text};
use log::info;
use signup::config::Config;
use signup::form::{FormController, SubmitOutcome};
use signup::models::{Country, Field, InputKind};
use strum::IntoEnumIterator;
use strum_macros::EnumIter;

type MenuExit = Option<()>;
const MENU_EXIT: MenuExit = None;
const MENU_LOOP: MenuExit = Some(());

/// A text menu
trait Menu {
    /// Runs the menu once. Returns None when the menu wants to end,
    /// Some(()) when it must run again.
    fn enter(&mut self) -> Result<MenuExit>;

    /// Runs the menu in a loop, reporting errors, until it wants to end
    fn enter_loop(&mut self) {
        while let Some(result) = self.enter().transpose() {
            if let Err(error) = result {
                eprintln!("Error: {error}");
            }
        }
    }
}

pub struct App {
    form: FormController,
}

impl App {
    pub fn new(config: &Config) -> Self {
        App {
            form: FormController::new(config.form),
        }
    }

    pub fn start(&mut self) -> Result<()> {
        println!("Create Account");
        self.enter_loop();
        Ok(())
    }

    /// Prompts for one field and feeds the answer to the form.
    ///
    /// Leaving a prompt with Esc counts as a blur with the current value.
    fn fill(&mut self, field: Field) -> Result<()> {
        let kind = field.input_kind();
        let current = self.form.values().get(field).as_text().into_owned();

        match prompt_field(field, &current)? {
            Some(raw) => self.form.on_field_change(field.as_ref(), &raw, kind),
            None => self.form.on_field_blur(field.as_ref(), &current, kind),
        }
        Ok(())
    }

    fn print_errors(&self) {
        for (field, error) in self.form.visible_errors() {
            println!("  ! {}: {error}", field.label());
        }
    }

    fn print_form(&self) {
        let values = self.form.values().redacted();
        for field in Field::iter() {
            let shown = match field {
                Field::Terms if values.terms => "accepted".to_string(),
                Field::Terms => "not accepted".to_string(),
                _ => values.get(field).as_text().into_owned(),
            };
            println!("{:>20}: {shown}", field.label());
            if self.form.state().is_error_visible(field) {
                println!("{:>20}  ! {}", "", self.form.error(field.as_ref()));
            }
        }
    }
}

impl Menu for App {
    fn enter(&mut self) -> Result<MenuExit> {
        #[derive(EnumIter, Display)]
        enum Choice {
            #[display("Fill in a field")]
            Fill,
            #[display("Show form")]
            Show,
            #[display("Submit")]
            Submit,
            #[display("Quit")]
            Quit,
        }

        let choice = match Select::new("What do you want to do?", Choice::iter().collect()).prompt() {
            Ok(choice) => choice,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => {
                return Ok(MENU_EXIT)
            }
            Err(error) => return Err(error.into()),
        };

        match choice {
            Choice::Fill => {
                let fields: Vec<FieldChoice> = Field::iter().map(FieldChoice).collect();
                if let Some(FieldChoice(field)) = Select::new("Field:", fields).prompt_skippable()? {
                    self.fill(field)?;
                    self.print_errors();
                }
                Ok(MENU_LOOP)
            }
            Choice::Show => {
                self.print_form();
                Ok(MENU_LOOP)
            }
            Choice::Submit => match self.form.submit() {
                SubmitOutcome::Accepted(values) => {
                    println!("Form submitted successfully");
                    println!("{}", serde_json::to_string_pretty(&values.redacted())?);
                    if self.form.options().reset_on_success {
                        info!("Starting a new form");
                        Ok(MENU_LOOP)
                    } else {
                        Ok(MENU_EXIT)
                    }
                }
                SubmitOutcome::Rejected(_) => {
                    self.print_errors();
                    Ok(MENU_LOOP)
                }
            },
            Choice::Quit => Ok(MENU_EXIT),
        }
    }
}

/// A field as listed in the field selector
struct FieldChoice(Field);

impl std::fmt::Display for FieldChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let required = if self.0 == Field::Passkey { "" } else { " *" };
        write!(f, "{}{required}", self.0.label())
    }
}

/// Asks for a new value of `field`. Returns None when the prompt was left
/// with Esc.
fn prompt_field(field: Field, current: &str) -> Result<Option<String>> {
    let message = format!("{}:", field.label());

    let answer = match field.input_kind() {
        InputKind::Password => Password::new(&message)
            .without_confirmation()
            .with_display_mode(PasswordDisplayMode::Masked)
            .with_display_toggle_enabled()
            .prompt_skippable()?,

        InputKind::Select => Select::new(&message, Country::iter().collect())
            .prompt_skippable()?
            .map(|country: Country| country.as_ref().to_owned()),

        InputKind::Checkbox => Confirm::new("I agree to the Terms & Privacy Policy")
            .with_default(!current.is_empty())
            .prompt_skippable()?
            .map(|accepted| accepted.to_string()),

        InputKind::Date => Text::new(&message)
            .with_initial_value(current)
            .with_placeholder("YYYY-MM-DD")
            .prompt_skippable()?,

        InputKind::Text | InputKind::Email | InputKind::Tel => Text::new(&message)
            .with_initial_value(current)
            .prompt_skippable()?,
    };

    Ok(answer)
}

fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    simple_logging::log_to_file(&config.log_file, config.log_level)?;
    info!("Starting with {config:?}");

    App::new(&config).start()
}
