pub mod books;
pub mod jobs;
pub mod products;

use trove_db::Database;
use trove_kernel::ModuleRegistry;

/// Register every resource module, each holding a handle to `db`
pub fn register_all(registry: &mut ModuleRegistry, db: &Database) {
    registry.register(books::create_module(db.clone()));
    registry.register(jobs::create_module(db.clone()));
    registry.register(products::create_module(db.clone()));
}
