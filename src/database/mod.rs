use mongodb::error::{ErrorKind, WriteFailure};
use mongodb::{Client, Collection, Database};
use std::error::Error;

/// E11000: a write collided with one of the unique indexes below.
pub fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    matches!(
        err.kind.as_ref(),
        ErrorKind::Write(WriteFailure::WriteError(write_err)) if write_err.code == 11000
    )
}

#[derive(Clone)]
pub struct MongoDB {
    client: Client,
    db: Database,
}

impl MongoDB {
    pub async fn new(uri: &str) -> Result<Self, Box<dyn Error>> {
        let mut client_options = mongodb::options::ClientOptions::parse(uri).await?;

        // Connection pool otimizado
        client_options.max_pool_size = Some(20);
        client_options.min_pool_size = Some(5);
        client_options.max_idle_time = Some(std::time::Duration::from_secs(300));

        client_options.connect_timeout = Some(std::time::Duration::from_secs(5));
        client_options.server_selection_timeout = Some(std::time::Duration::from_secs(5));

        let client = Client::with_options(client_options)?;

        // Extract database name from URI or use default
        let db_name = uri
            .split('/')
            .last()
            .and_then(|s| s.split('?').next())
            .unwrap_or("jobboard");

        let db = client.database(db_name);

        // Test connection
        db.list_collection_names().await?;

        let mongodb = Self { client, db };

        mongodb.ensure_indexes().await?;

        Ok(mongodb)
    }

    /// Creates the unique indexes backing the data-model invariants:
    /// one account per email per collection, one outstanding offer per
    /// (recruiter, user) pair.
    async fn ensure_indexes(&self) -> Result<(), Box<dyn Error>> {
        use mongodb::bson::doc;
        use mongodb::options::IndexOptions;
        use mongodb::IndexModel;

        log::info!("🔧 Creating database indexes...");

        let unique = IndexOptions::builder().unique(true).build();

        // Index for users: (email) unique - one account per email
        let users = self.database().collection::<mongodb::bson::Document>("users");

        let users_email_index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(unique.clone())
            .build();

        match users.create_index(users_email_index).await {
            Ok(_) => log::info!("   ✅ Index created: users(email) unique"),
            Err(e) => log::debug!("   ℹ️  Index already exists: {}", e),
        }

        // Index for recruiters: (email) unique
        let recruiters = self
            .database()
            .collection::<mongodb::bson::Document>("recruiters");

        let recruiters_email_index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(unique.clone())
            .build();

        match recruiters.create_index(recruiters_email_index).await {
            Ok(_) => log::info!("   ✅ Index created: recruiters(email) unique"),
            Err(e) => log::debug!("   ℹ️  Index already exists: {}", e),
        }

        // Index for offers: (from, to) unique - at most one outstanding offer
        // per (recruiter, user) pair
        let offers = self.database().collection::<mongodb::bson::Document>("offers");

        let offers_pair_index = IndexModel::builder()
            .keys(doc! { "from": 1, "to": 1 })
            .options(unique)
            .build();

        match offers.create_index(offers_pair_index).await {
            Ok(_) => log::info!("   ✅ Index created: offers(from, to) unique"),
            Err(e) => log::debug!("   ℹ️  Index already exists: {}", e),
        }

        // Index for offers: (to) - listing offers addressed to a user stays
        // cheap even though the visible surface only fetches by id today
        let offers_to_index = IndexModel::builder().keys(doc! { "to": 1 }).build();

        match offers.create_index(offers_to_index).await {
            Ok(_) => log::info!("   ✅ Index created: offers(to)"),
            Err(e) => log::debug!("   ℹ️  Index already exists: {}", e),
        }

        log::info!("✅ Database indexes ready");

        Ok(())
    }

    pub fn collection<T: Send + Sync>(&self, name: &str) -> Collection<T> {
        self.db.collection(name)
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    pub fn client(&self) -> &Client {
        &self.client
    }
}
