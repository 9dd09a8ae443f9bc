//! Basic example of the appcontext container.

use std::sync::Arc;

use appcontext::prelude::*;

// === Define your services ===

trait Logger: Send + Sync {
    fn log(&self, msg: &str);
}

struct ConsoleLogger;

impl Logger for ConsoleLogger {
    fn log(&self, msg: &str) {
        println!("[LOG] {msg}");
    }
}

struct Database {
    url: String,
    logger: Arc<dyn Logger>,
}

impl Database {
    fn query(&self, sql: &str) -> String {
        self.logger.log(&format!("Executing: {sql}"));
        format!("Results from {}", self.url)
    }
}

#[derive(Default)]
struct Basket {
    items: std::sync::Mutex<Vec<String>>,
}

impl Basket {
    fn add(&self, item: &str) {
        self.items.lock().unwrap().push(item.to_string());
    }

    fn len(&self) -> usize {
        self.items.lock().unwrap().len()
    }
}

fn main() -> Result<()> {
    // Initialize tracing (logging)
    tracing_subscriber::fmt()
        .with_env_filter("appcontext=debug")
        .init();

    let ctx = ApplicationContext::new();

    // Logger — singleton
    ctx.register(
        "logger",
        ObjectDefinition::new(|_| Ok(object(Arc::new(ConsoleLogger) as Arc<dyn Logger>))),
    )?;

    // Database — singleton, depends on config value + injected logger
    ctx.register(
        "database",
        ObjectDefinition::new(|call| {
            let url: Arc<String> = call.require_arg(0)?;
            let logger = call
                .require_kwarg::<Arc<dyn Logger>>("logger")?
                .as_ref()
                .clone();
            Ok(object(Database {
                url: (*url).clone(),
                logger,
            }))
        })
        .with_arg(Arg::value(String::from("postgres://localhost/myapp")))
        .with_kwarg("logger", Arg::inject("logger")),
    )?;

    // Basket — one per session
    ctx.register(
        "basket",
        ObjectDefinition::new(|_| Ok(object(Basket::default()))).with_scope(Scope::Session),
    )?;

    println!("{}", ctx.describe());

    // === Resolve from the base context ===
    let db = ctx.get_as::<Database>("database")?;
    println!("{}", db.query("SELECT * FROM users"));

    // === Per-request resolution through the middleware ===
    let middleware = ContextMiddleware::new(Arc::new(ctx));
    let session: Arc<dyn SessionStore> = Arc::new(MemorySessionStore::new());

    // First request of the session fills the basket
    {
        let request = middleware.begin_request(session.clone());
        let basket = request.get_as::<Basket>("basket")?;
        basket.add("apples");
    }

    // Second request of the same session sees it
    {
        let request = middleware.begin_request(session.clone());
        let basket = request.get_as::<Basket>("basket")?;
        basket.add("pears");
        println!("basket holds {} items", basket.len());
    }

    Ok(())
}
