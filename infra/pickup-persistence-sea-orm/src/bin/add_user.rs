use pickup_persistence_sea_orm::{create_db_pool, users::UserRepositoryImpl};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 || args.len() > 4 {
        eprintln!("Usage: add_user <name> [<position>] [<level>]");
        std::process::exit(1);
    }

    let name = &args[1];
    let position = args.get(2).map(|p| p.as_str());
    let level = match args.get(3).map(|l| l.parse::<i32>()) {
        Some(Ok(level)) => Some(level),
        Some(Err(_)) => {
            eprintln!("Level must be a whole number");
            std::process::exit(1);
        }
        None => None,
    };

    let users = UserRepositoryImpl::from_connection(create_db_pool().await);
    let user_id = users
        .create_user(name, position, level, None)
        .await
        .expect("Failed to insert new user");

    println!("Created user [{}] with id [{}]", name, user_id);
}
