//! Interactive session: authentication, then the role-gated menu loop.

use std::io;

use stocktrack_core::inventory::{parse_quantity, ItemId, ItemUpdate, SearchCriterion, SearchField};
use stocktrack_core::{
    Catalog, Directory, MenuAction, Role, Session, StockConfig, StockError,
};

use crate::prompt::Prompter;
use crate::render;

/// What the loop does after an action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

pub struct Shell<P> {
    prompter: P,
    catalog: Catalog,
    directory: Directory,
    config: StockConfig,
}

impl<P: Prompter> Shell<P> {
    pub fn new(prompter: P, config: StockConfig) -> Self {
        let catalog = Catalog::open_file(config.inventory_path());
        let directory = Directory::open_file(config.users_path());
        Self {
            prompter,
            catalog,
            directory,
            config,
        }
    }

    /// Authenticate, then serve menu choices until Exit.
    pub fn run(&mut self) -> io::Result<()> {
        self.report_load_warnings();
        self.prompter.clear()?;

        let session = self.authenticate()?;
        println!("{}", render::success(&format!("\nWelcome, {}!", session.username())));

        loop {
            self.show_menu(&session);
            let action = self.choose_action()?;
            if self.dispatch(&session, action)? == Flow::Exit {
                return Ok(());
            }
            self.prompter.pause()?;
            self.prompter.clear()?;
        }
    }

    fn report_load_warnings(&self) {
        let warnings = [self.catalog.load_warning(), self.directory.load_warning()];
        for warning in warnings.into_iter().flatten() {
            println!("{}", render::warning(&format!("Warning: {warning}")));
        }
    }

    /// Repeat login / sign-up until a login succeeds
    pub fn authenticate(&mut self) -> io::Result<Session> {
        loop {
            println!("{}", render::heading("Welcome to Inventory Management App"));
            let choice = self
                .prompter
                .ask("Do you want to (L)ogin or (S)ign up? [L/S]: ")?;
            match choice.trim().to_ascii_uppercase().as_str() {
                "L" => {
                    if let Some(session) = self.login()? {
                        return Ok(session);
                    }
                }
                "S" => self.sign_up()?,
                _ => println!("{}", render::failure("Please enter L or S.")),
            }
        }
    }

    fn login(&mut self) -> io::Result<Option<Session>> {
        println!("{}", render::heading("Login"));
        let username = self.prompter.ask("Enter your username: ")?;
        let password = self.prompter.ask_secret("Enter your password: ")?;

        match self.directory.login(&username, &password) {
            Ok(session) => {
                println!("{}", render::success("Login successful!"));
                Ok(Some(session))
            }
            Err(e) => {
                println!("{}", render::failure(&e.to_string()));
                Ok(None)
            }
        }
    }

    fn sign_up(&mut self) -> io::Result<()> {
        println!("{}", render::heading("Sign Up"));
        let username = self.prompter.ask("Enter a new username: ")?;
        if self.directory.contains(&username) {
            println!(
                "{}",
                render::failure("Username already exists! Try logging in.")
            );
            return Ok(());
        }
        let password = self.prompter.ask_secret("Enter a new password: ")?;
        let confirm = self.prompter.ask_secret("Confirm your password: ")?;
        let role = self.ask_role()?;

        match self.directory.sign_up(&username, &password, &confirm, role) {
            Ok(_) => println!("{}", render::success("Account created successfully!")),
            Err(e) => self.show_error(&e),
        }
        Ok(())
    }

    fn ask_role(&mut self) -> io::Result<Role> {
        let choices: Vec<&str> = Role::ALL.iter().map(|role| role.as_str()).collect();
        let prompt = format!("Assign a role ({}): ", choices.join("/"));
        loop {
            let answer = self.prompter.ask(&prompt)?;
            match answer.parse::<Role>() {
                Ok(role) => return Ok(role),
                Err(e) => println!("{}", render::failure(&e.to_string())),
            }
        }
    }

    fn show_menu(&self, session: &Session) {
        println!("{}", render::heading("--- Inventory Management Menu ---"));
        for action in session.visible_actions() {
            println!("{}. {}", action.number(), action.label());
        }
    }

    fn choose_action(&mut self) -> io::Result<MenuAction> {
        loop {
            let answer = self.prompter.ask("Choose an option: ")?;
            let action = answer
                .trim()
                .parse::<usize>()
                .ok()
                .and_then(MenuAction::from_number);
            match action {
                Some(action) => return Ok(action),
                None => println!(
                    "{}",
                    render::failure(&format!(
                        "Please choose a number between 1 and {}.",
                        MenuAction::ALL.len()
                    ))
                ),
            }
        }
    }

    /// Run one menu action for `session`, refusing it if the role is too low.
    pub fn dispatch(&mut self, session: &Session, action: MenuAction) -> io::Result<Flow> {
        if session.authorize(action).is_err() {
            println!("{}", render::failure("Access denied!"));
            return Ok(Flow::Continue);
        }

        match action {
            MenuAction::ViewInventory => self.view_inventory(),
            MenuAction::AddItem => self.add_item()?,
            MenuAction::EditItem => self.edit_item()?,
            MenuAction::DeleteItem => self.delete_item()?,
            MenuAction::Summary => self.summary(),
            MenuAction::SearchItems => self.search_items()?,
            MenuAction::LowStockAlerts => self.low_stock_alerts()?,
            MenuAction::CategoryDistribution => {
                let distribution = self.catalog.reports().category_distribution();
                print!("{}", render::distribution(&distribution));
            }
            MenuAction::ValueTrend => {
                print!("{}", render::value_trend(&self.catalog.reports().value_trend()));
            }
            MenuAction::Exit => {
                println!(
                    "{}",
                    render::success("Exiting the application... Goodbye!")
                );
                return Ok(Flow::Exit);
            }
        }
        Ok(Flow::Continue)
    }

    fn view_inventory(&self) {
        if self.catalog.is_empty() {
            println!("{}", render::failure("No items in inventory."));
            return;
        }
        print!("{}", render::item_table("Inventory Items", self.catalog.list()));
    }

    fn add_item(&mut self) -> io::Result<()> {
        let name = self.prompter.ask("Enter item name: ")?;
        let category = self.prompter.ask("Enter item category: ")?;
        let quantity = self.prompter.ask("Enter quantity: ")?;
        let price = self.prompter.ask("Enter price: ")?;

        match self.catalog.add(&name, &category, &quantity, &price) {
            Ok(item) => println!(
                "{}",
                render::success(&format!("Item added successfully! (ID {})", item.id))
            ),
            Err(e) => self.show_error(&e),
        }
        Ok(())
    }

    fn edit_item(&mut self) -> io::Result<()> {
        let Some(id) = self.ask_id("Enter the ID of the item to edit: ")? else {
            return Ok(());
        };
        let Some(current) = self.catalog.get(id).cloned() else {
            self.show_error(&StockError::NotFound(id));
            return Ok(());
        };

        let name = self.prompter.ask(&format!("Enter new name ({}): ", current.name))?;
        let category = self
            .prompter
            .ask(&format!("Enter new category ({}): ", current.category))?;
        let quantity = self
            .prompter
            .ask(&format!("Enter new quantity ({}): ", current.quantity))?;
        let price = self
            .prompter
            .ask(&format!("Enter new price ({}): ", current.price))?;

        let update = ItemUpdate::from_inputs(&name, &category, &quantity, &price);
        match self.catalog.edit(id, &update) {
            Ok(_) => println!("{}", render::success("Item updated successfully!")),
            Err(e) => self.show_error(&e),
        }
        Ok(())
    }

    fn delete_item(&mut self) -> io::Result<()> {
        let Some(id) = self.ask_id("Enter the ID of the item to delete: ")? else {
            return Ok(());
        };
        match self.catalog.delete(id) {
            Ok(_) => println!("{}", render::success("Item deleted successfully!")),
            Err(e) => self.show_error(&e),
        }
        Ok(())
    }

    fn ask_id(&mut self, prompt: &str) -> io::Result<Option<ItemId>> {
        let answer = self.prompter.ask(prompt)?;
        match answer.parse::<ItemId>() {
            Ok(id) => Ok(Some(id)),
            Err(e) => {
                self.show_error(&e.into());
                Ok(None)
            }
        }
    }

    fn summary(&self) {
        if self.catalog.is_empty() {
            println!("{}", render::failure("No items in inventory."));
            return;
        }
        print!("{}", render::summary(&self.catalog.reports().summary()));
    }

    fn search_items(&mut self) -> io::Result<()> {
        let fields: Vec<&str> = SearchField::ALL.iter().map(|field| field.label()).collect();
        let answer = self
            .prompter
            .ask(&format!("Search by ({}): ", fields.join(", ")))?;
        let field = match answer.parse::<SearchField>() {
            Ok(field) => field,
            Err(_) => {
                println!("{}", render::failure("Invalid search option."));
                return Ok(());
            }
        };

        let criterion = match field {
            SearchField::Name => {
                SearchCriterion::by_name(self.prompter.ask("Enter the item name to search: ")?)
            }
            SearchField::Category => {
                SearchCriterion::by_category(self.prompter.ask("Enter the category to search: ")?)
            }
            SearchField::PriceRange => {
                let min = self.prompter.ask("Enter minimum price: ")?;
                let max = self.prompter.ask("Enter maximum price: ")?;
                match SearchCriterion::price_range_from_inputs(&min, &max) {
                    Ok(criterion) => criterion,
                    Err(e) => {
                        self.show_error(&e);
                        return Ok(());
                    }
                }
            }
        };

        let results = self.catalog.search(&criterion);
        if results.is_empty() {
            println!(
                "{}",
                render::failure("No items found matching the search criteria.")
            );
        } else {
            print!("{}", render::item_table("Search Results", &results));
        }
        Ok(())
    }

    fn low_stock_alerts(&mut self) -> io::Result<()> {
        let default = self.config.low_stock_threshold;
        let answer = self
            .prompter
            .ask(&format!("Enter low-stock threshold [{default}]: "))?;
        let threshold = if answer.trim().is_empty() {
            default
        } else {
            match parse_quantity(&answer) {
                Ok(threshold) => threshold,
                Err(_) => {
                    println!(
                        "{}",
                        render::failure("Threshold must be a non-negative whole number.")
                    );
                    return Ok(());
                }
            }
        };

        let low = self.catalog.reports().low_stock(threshold);
        if low.is_empty() {
            println!(
                "{}",
                render::success(&format!("No items below the threshold of {threshold}."))
            );
        } else {
            let title = format!("Low-Stock Items (Threshold: {threshold})");
            print!("{}", render::item_table(&title, &low));
        }
        Ok(())
    }

    fn show_error(&self, error: &StockError) {
        if error.is_storage() {
            tracing::error!(error = %error, "save failed");
            println!(
                "{}",
                render::failure(&format!("Could not save changes: {error}"))
            );
        } else {
            println!("{}", render::failure(&error.root().to_string()));
        }
    }
}
