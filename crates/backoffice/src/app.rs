//! Command handlers.
//!
//! [`App`] owns one instance of every service, seeded fresh, and turns a
//! parsed [`Command`] into output text. Handlers return data; whether it
//! is serialized or rendered through a view is decided in one place by
//! the output mode.

use anyhow::{bail, Context};
use backoffice_query::{Dir, ListState, NumericRange, OwnedPage};
use serde::Serialize;
use serde_json::json;

use crate::cli::{
    AnalyticsCommand, Command, CreateProductArgs, CreateUserArgs, ListArgs, ProductListArgs,
    ProductsCommand, UpdateProductArgs, UpdateUserArgs, UserListArgs, UsersCommand,
};
use crate::config::Config;
use crate::model::{Credentials, Product, User};
use crate::output::{serialize_csv, serialize_structured, OutputMode};
use crate::service::{AnalyticsService, AuthService, Latency, ProductService, UserService};
use crate::store::ResourceStore;
use crate::views::{Detail, DetailView, ListView, ListViewBuilder, Message, Renderer, Tabular};

/// Text ready to print.
pub type HandlerResult = anyhow::Result<String>;

pub struct App {
    config: Config,
    mode: OutputMode,
    renderer: Renderer,
    auth: AuthService,
    users: UserService,
    products: ProductService,
    analytics: AnalyticsService,
}

impl App {
    /// Seeds every service and resolves the output mode.
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let mode = config.output.resolve_auto();
        let renderer = Renderer::new(mode == OutputMode::Term, config.theme)
            .context("failed to load templates")?;
        let latency = Latency::new(config.latency_scale);
        Ok(App {
            mode,
            renderer,
            auth: AuthService::new(latency),
            users: UserService::seeded(latency),
            products: ProductService::seeded(latency),
            analytics: AnalyticsService::new(latency),
            config,
        })
    }

    pub fn mode(&self) -> OutputMode {
        self.mode
    }

    pub fn handle(&mut self, command: Command) -> HandlerResult {
        match command {
            Command::Login(args) => {
                let session = self
                    .auth
                    .login(&Credentials::new(args.email, args.password))
                    .context("login failed")?;
                self.detail(&session, None)
            }
            Command::Users { command } => self.users(command),
            Command::Products { command } => self.products(command),
            Command::Analytics { command } => self.analytics(command.unwrap_or_default()),
        }
    }

    fn users(&mut self, command: UsersCommand) -> HandlerResult {
        match command {
            UsersCommand::List(args) => {
                let state = user_list_state(&args, self.config.users_page_size);
                let page = self.users.list(&state)?;
                self.list(&page, &state, "Users", "No users found.")
            }
            UsersCommand::Show { id } => {
                let id = self.users.parse_id(&id)?;
                let user = self.users.resolve(&id)?;
                self.detail(&user, None)
            }
            UsersCommand::Create(args) => {
                let user = self.users.create(create_user(args))?;
                self.detail(&user, Some(Message::success("User created.")))
            }
            UsersCommand::Update(args) => {
                let id = self.users.parse_id(&args.id)?;
                let patch = update_user(args);
                if patch.is_empty() {
                    bail!("nothing to update: pass at least one of --name, --email, --role, --status");
                }
                let user = self.users.update(&id, patch)?;
                self.detail(&user, Some(Message::success("User updated.")))
            }
            UsersCommand::Delete { id } => {
                let id = self.users.parse_id(&id)?;
                self.users.delete(&id)?;
                self.deleted("User", &id)
            }
        }
    }

    fn products(&mut self, command: ProductsCommand) -> HandlerResult {
        match command {
            ProductsCommand::List(args) => {
                let state = product_list_state(&args, self.config.products_page_size);
                let page = self.products.list(&state)?;
                self.list(&page, &state, "Products", "No products found.")
            }
            ProductsCommand::Show { id } => {
                let id = self.products.parse_id(&id)?;
                let product = self.products.resolve(&id)?;
                self.detail(&product, None)
            }
            ProductsCommand::Create(args) => {
                let product = self.products.create(create_product(args))?;
                self.detail(&product, Some(Message::success("Product created.")))
            }
            ProductsCommand::Update(args) => {
                let id = self.products.parse_id(&args.id)?;
                let patch = update_product(args);
                if patch.is_empty() {
                    bail!("nothing to update: pass at least one field flag such as --name, --price or --stock");
                }
                let product = self.products.update(&id, patch)?;
                self.detail(&product, Some(Message::success("Product updated.")))
            }
            ProductsCommand::Delete { id } => {
                let id = self.products.parse_id(&id)?;
                self.products.delete(&id)?;
                self.deleted("Product", &id)
            }
            ProductsCommand::Categories => {
                let categories = self.products.categories();
                if self.mode.is_structured() {
                    return self.structured(&categories);
                }
                let rows = categories.iter().map(|c| vec![c.clone()]).collect();
                let view = ListViewBuilder::new(vec!["Category".to_string()], rows)
                    .intro("Categories")
                    .empty_message("No categories.")
                    .build();
                Ok(self.renderer.render_list(&view)?)
            }
        }
    }

    fn analytics(&self, command: AnalyticsCommand) -> HandlerResult {
        let analytics = &self.analytics;
        match command {
            AnalyticsCommand::Dashboard => self.detail(&analytics.dashboard_metrics(), None),
            AnalyticsCommand::Realtime => self.detail(&analytics.realtime_metrics(), None),
            AnalyticsCommand::Monthly => self.table(&analytics.monthly_data(), "Monthly"),
            AnalyticsCommand::Revenue => self.table(&analytics.revenue_series(), "Revenue"),
            AnalyticsCommand::Growth => self.table(&analytics.user_growth(), "User growth"),
            AnalyticsCommand::Pages { limit } => self.table(&analytics.top_pages(limit), "Top pages"),
            AnalyticsCommand::Traffic => self.table(&analytics.traffic_sources(), "Traffic sources"),
            AnalyticsCommand::Funnel => self.table(&analytics.conversion_funnel(), "Conversion funnel"),
            AnalyticsCommand::Tiles => self.table(&analytics.metric_tiles(), "Key metrics"),
            AnalyticsCommand::Export => {
                let csv = analytics.export_csv()?;
                Ok(csv.trim_end().to_string())
            }
        }
    }

    fn structured<T: Serialize>(&self, data: &T) -> HandlerResult {
        let text = serialize_structured(data, self.mode)?;
        Ok(text.trim_end().to_string())
    }

    /// A page of records: `{items, pagination}` when structured, bare
    /// items for CSV, a list view otherwise.
    fn list<T>(&self, page: &OwnedPage<T>, state: &ListState, intro: &str, empty: &str) -> HandlerResult
    where
        T: Serialize + Tabular,
    {
        match self.mode {
            OutputMode::Csv => Ok(serialize_csv(&page.items)?.trim_end().to_string()),
            mode if mode.is_structured() => self.structured(page),
            _ => {
                let view = ListView::table(&page.items)
                    .intro(intro)
                    .filter(&state.filter)
                    .empty_message(empty)
                    .paginated(&page.pagination)
                    .build();
                Ok(self.renderer.render_list(&view)?)
            }
        }
    }

    fn table<T: Serialize + Tabular>(&self, rows: &[T], intro: &str) -> HandlerResult {
        if self.mode.is_structured() {
            return self.structured(&rows);
        }
        let view = ListView::table(rows).intro(intro).build();
        Ok(self.renderer.render_list(&view)?)
    }

    fn detail<T: Serialize + Detail>(&self, item: &T, message: Option<Message>) -> HandlerResult {
        if self.mode.is_structured() {
            return self.structured(item);
        }
        let mut view = DetailView::of(item);
        view.messages.extend(message);
        Ok(self.renderer.render_detail(&view)?)
    }

    fn deleted(&self, kind: &str, id: &str) -> HandlerResult {
        if self.mode.is_structured() {
            return self.structured(&json!({ "deleted": id, "kind": kind.to_lowercase() }));
        }
        let view = DetailView::messages_only(vec![Message::success(format!("{} {} deleted.", kind, id))]);
        Ok(self.renderer.render_detail(&view)?)
    }
}

/// Sort field from the flags, or the screen's default order.
fn apply_sort(state: &mut ListState, args: &ListArgs) {
    if let Some(field) = &args.sort {
        let dir = if args.desc { Dir::Desc } else { Dir::Asc };
        state.set_sort(field.clone(), dir);
    }
}

fn apply_paging(state: &mut ListState, args: &ListArgs) {
    if let Some(size) = args.page_size {
        state.set_page_size(size);
    }
    state.go_to_page(args.page);
}

fn user_list_state(args: &UserListArgs, page_size: usize) -> ListState {
    let mut state = UserService::default_list_state(page_size);
    if let Some(search) = &args.list.search {
        state.set_search(search.clone());
    }
    if let Some(role) = args.role {
        state.select(User::ROLE, role.to_string());
    }
    if let Some(status) = args.status {
        state.select(User::STATUS, status.to_string());
    }
    apply_sort(&mut state, &args.list);
    apply_paging(&mut state, &args.list);
    state
}

fn product_list_state(args: &ProductListArgs, page_size: usize) -> ListState {
    let mut state = ProductService::default_list_state(page_size);
    if let Some(search) = &args.list.search {
        state.set_search(search.clone());
    }
    if let Some(category) = &args.category {
        state.select(Product::CATEGORY, category.clone());
    }
    if let Some(status) = args.status {
        state.select(Product::STATUS, status.to_string());
    }
    if args.min_price.is_some() || args.max_price.is_some() {
        state.set_range(Some(NumericRange::new(
            args.min_price.unwrap_or(0.0),
            args.max_price.unwrap_or(f64::MAX),
        )));
    }
    apply_sort(&mut state, &args.list);
    apply_paging(&mut state, &args.list);
    state
}

fn create_user(args: CreateUserArgs) -> crate::model::CreateUser {
    crate::model::CreateUser {
        name: args.name,
        email: args.email,
        role: args.role,
        password: args.password,
    }
}

fn update_user(args: UpdateUserArgs) -> crate::model::UpdateUser {
    crate::model::UpdateUser {
        name: args.name,
        email: args.email,
        role: args.role,
        status: args.status,
    }
}

fn create_product(args: CreateProductArgs) -> crate::model::CreateProduct {
    crate::model::CreateProduct {
        name: args.name,
        description: args.description,
        price: args.price,
        category: args.category,
        stock: args.stock,
        status: args.status,
        images: args.images,
        sku: args.sku,
        tags: args.tags,
    }
}

fn update_product(args: UpdateProductArgs) -> crate::model::UpdateProduct {
    crate::model::UpdateProduct {
        name: args.name,
        description: args.description,
        price: args.price,
        category: args.category,
        stock: args.stock,
        status: args.status,
        images: (!args.images.is_empty()).then_some(args.images),
        sku: args.sku,
        tags: args.tags,
    }
}
