use pickup_app::domain::UserId;
use pickup_auth_jwt::JwtAuthenticationAdapter;

fn main() {
    dotenvy::dotenv().ok();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 || args.len() > 3 {
        eprintln!("Usage: issue_token <user_id> [<hours>]");
        std::process::exit(1);
    }

    let Ok(user_id) = args[1].parse::<i64>() else {
        eprintln!("User id must be a whole number");
        std::process::exit(1);
    };
    let hours = match args.get(2).map(|h| h.parse::<i64>()) {
        Some(Ok(hours)) if hours > 0 => hours,
        Some(_) => {
            eprintln!("Hours must be a positive whole number");
            std::process::exit(1);
        }
        None => 24,
    };

    let adapter = JwtAuthenticationAdapter::from_env();
    match adapter.generate_jwt(UserId(user_id), chrono::Duration::hours(hours)) {
        Ok(token) => println!("{}", token),
        Err(e) => {
            eprintln!("Failed to sign token: {}", e);
            std::process::exit(1);
        }
    }
}
