// src/bin/seed.rs
// DOCUMENTATION: Seeding companion binary
// PURPOSE: Insert the achievement catalog and a bootstrap admin account
//
// Run once after the schema is in place:
//   DATABASE_URL=... SEED_ADMIN_EMAIL=... SEED_ADMIN_PASSWORD=... cargo run --bin seed

use argon2::password_hash::{rand_core::OsRng, SaltString};
use argon2::{Argon2, PasswordHasher};
use dotenv::dotenv;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::env;
use std::process;
use uuid::Uuid;

/// Achievement catalog: (code, title, description)
/// Must stay in sync with the codes the awarding service refers to.
const CATALOG: &[(&str, &str, &str)] = &[
    (
        "FIRST_APPLICATION",
        "First step",
        "Submitted a first financial-aid application",
    ),
    ("FIRST_APPROVED", "Trusted", "Had a first application approved"),
    ("FIRST_DONATION", "Helper", "Made a first confirmed donation"),
    ("GENEROUS", "Generous heart", "Made ten confirmed donations"),
    ("SOCIAL", "Sociable", "Connected with five friends"),
    (
        "STORYTELLER",
        "Storyteller",
        "Collected ten likes on a published story",
    ),
];

async fn seed_achievements(pool: &PgPool) -> Result<(), sqlx::Error> {
    for (code, title, description) in CATALOG {
        sqlx::query(
            r#"
            INSERT INTO achievements (id, code, title, description)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (code) DO UPDATE
            SET title = EXCLUDED.title,
                description = EXCLUDED.description
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(code)
        .bind(title)
        .bind(description)
        .execute(pool)
        .await?;

        println!("  achievement {}", code);
    }
    Ok(())
}

async fn seed_admin(pool: &PgPool, email: &str, password: &str) -> Result<(), String> {
    let salt = SaltString::generate(&mut OsRng);
    let password_hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| format!("password hashing failed: {}", e))?
        .to_string();

    sqlx::query(
        r#"
        INSERT INTO users (
            id, email, password_hash, display_name, role,
            is_hero, created_at, updated_at
        )
        VALUES ($1, $2, $3, 'Administrator', 'ADMIN', false, NOW(), NOW())
        ON CONFLICT (email) DO UPDATE
        SET role = 'ADMIN', updated_at = NOW()
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(email)
    .bind(&password_hash)
    .execute(pool)
    .await
    .map_err(|e| format!("admin insert failed: {}", e))?;

    println!("  admin {}", email);
    Ok(())
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    let database_url = match env::var("DATABASE_URL") {
        Ok(url) => url,
        Err(_) => {
            eprintln!("DATABASE_URL is required");
            process::exit(1);
        }
    };

    let pool = match PgPoolOptions::new()
        .max_connections(2)
        .connect(&database_url)
        .await
    {
        Ok(pool) => pool,
        Err(e) => {
            eprintln!("Failed to connect to database: {}", e);
            process::exit(1);
        }
    };

    println!("Seeding achievement catalog...");
    if let Err(e) = seed_achievements(&pool).await {
        eprintln!("Achievement seeding failed: {}", e);
        process::exit(1);
    }

    match (env::var("SEED_ADMIN_EMAIL"), env::var("SEED_ADMIN_PASSWORD")) {
        (Ok(email), Ok(password)) => {
            println!("Seeding bootstrap admin...");
            if let Err(e) = seed_admin(&pool, &email, &password).await {
                eprintln!("{}", e);
                process::exit(1);
            }
        }
        _ => {
            println!("SEED_ADMIN_EMAIL / SEED_ADMIN_PASSWORD not set - skipping admin");
        }
    }

    println!("Done.");
}
