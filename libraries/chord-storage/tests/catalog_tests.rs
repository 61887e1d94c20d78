/// Catalog persistence tests
/// Round trips, partial updates, and cascade deletes against a real database
use chord_core::types::{CreateAlbum, CreateArtist, CreateSong, Genre, Role, UpdateSong};
use chord_storage::{albums, artists, create_pool, run_migrations, songs, users};
use sqlx::SqlitePool;

async fn test_pool() -> SqlitePool {
    let pool = create_pool("sqlite::memory:").await.unwrap();
    run_migrations(&pool).await.unwrap();
    pool
}

async fn seed_publisher(pool: &SqlitePool) -> chord_core::types::User {
    users::create(pool, "publisher@example.com", Role::Publisher)
        .await
        .unwrap()
}

fn song_under(album_id: Option<i64>, title: &str) -> CreateSong {
    CreateSong {
        album_id,
        title: title.to_string(),
        genre: Genre::Rock,
        duration_secs: Some(214),
        audio_path: "audio/test.mp3".to_string(),
        cover_path: None,
        release_date: None,
    }
}

#[tokio::test]
async fn user_round_trip_and_credentials() {
    let pool = test_pool().await;

    let user = users::create(&pool, "alice@example.com", Role::Admin)
        .await
        .unwrap();
    assert_eq!(user.email, "alice@example.com");
    assert_eq!(user.role, Role::Admin);

    let found = users::find_by_email(&pool, "alice@example.com")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found, user);

    // No credentials yet
    assert!(users::get_password_hash(&pool, user.id)
        .await
        .unwrap()
        .is_none());

    users::set_password_hash(&pool, user.id, "$2b$12$hash").await.unwrap();
    assert_eq!(
        users::get_password_hash(&pool, user.id).await.unwrap(),
        Some("$2b$12$hash".to_string())
    );

    // Upsert replaces
    users::set_password_hash(&pool, user.id, "$2b$12$other").await.unwrap();
    assert_eq!(
        users::get_password_hash(&pool, user.id).await.unwrap(),
        Some("$2b$12$other".to_string())
    );
}

#[tokio::test]
async fn duplicate_email_is_rejected() {
    let pool = test_pool().await;

    users::create(&pool, "dup@example.com", Role::User).await.unwrap();
    let result = users::create(&pool, "dup@example.com", Role::User).await;
    assert!(result.is_err(), "unique constraint should reject duplicate");
}

#[tokio::test]
async fn artist_round_trip_and_partial_update() {
    let pool = test_pool().await;
    let publisher = seed_publisher(&pool).await;

    let created = artists::create(
        &pool,
        CreateArtist {
            publisher_id: publisher.id,
            name: "Miles Davis".to_string(),
            bio: Some("Trumpeter".to_string()),
            birth_date: Some("1926-05-26".to_string()),
            country: Some("US".to_string()),
        },
    )
    .await
    .unwrap();

    let fetched = artists::get_by_id(&pool, created.id).await.unwrap().unwrap();
    assert_eq!(fetched, created);

    // Patch only the country; everything else must survive
    let updated = artists::update(
        &pool,
        created.id,
        chord_core::types::UpdateArtist {
            country: Some("USA".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(updated.country.as_deref(), Some("USA"));
    assert_eq!(updated.name, "Miles Davis");
    assert_eq!(updated.bio.as_deref(), Some("Trumpeter"));

    let owned = artists::get_by_publisher(&pool, publisher.id).await.unwrap();
    assert_eq!(owned.len(), 1);
}

#[tokio::test]
async fn songs_list_by_album_in_insertion_order() {
    let pool = test_pool().await;
    let publisher = seed_publisher(&pool).await;

    let artist = artists::create(
        &pool,
        CreateArtist {
            publisher_id: publisher.id,
            name: "Artist".to_string(),
            bio: None,
            birth_date: None,
            country: None,
        },
    )
    .await
    .unwrap();

    let album = albums::create(
        &pool,
        CreateAlbum {
            artist_id: artist.id,
            title: "Album".to_string(),
            release_date: None,
            cover_path: None,
        },
    )
    .await
    .unwrap();

    for title in ["first", "second", "third"] {
        songs::create(&pool, song_under(Some(album.id), title)).await.unwrap();
    }

    let listed = songs::get_by_album(&pool, album.id).await.unwrap();
    let titles: Vec<&str> = listed.iter().map(|s| s.title.as_str()).collect();
    assert_eq!(titles, ["first", "second", "third"]);
}

#[tokio::test]
async fn song_partial_update_keeps_unpatched_fields() {
    let pool = test_pool().await;

    let song = songs::create(&pool, song_under(None, "loose track")).await.unwrap();
    assert_eq!(song.likes, 0);
    assert_eq!(song.genre, Genre::Rock);

    let updated = songs::update(
        &pool,
        song.id,
        UpdateSong {
            likes: Some(42),
            genre: Some(Genre::Jazz),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    assert_eq!(updated.likes, 42);
    assert_eq!(updated.genre, Genre::Jazz);
    assert_eq!(updated.title, "loose track");
    assert_eq!(updated.duration_secs, Some(214));
    assert_eq!(updated.audio_path, "audio/test.mp3");
}

#[tokio::test]
async fn negative_likes_violate_check_constraint() {
    let pool = test_pool().await;
    let song = songs::create(&pool, song_under(None, "track")).await.unwrap();

    let result = songs::update(
        &pool,
        song.id,
        UpdateSong {
            likes: Some(-1),
            ..Default::default()
        },
    )
    .await;
    assert!(result.is_err(), "likes must stay non-negative");
}

#[tokio::test]
async fn deleting_artist_cascades_to_albums_and_songs() {
    let pool = test_pool().await;
    let publisher = seed_publisher(&pool).await;

    let artist = artists::create(
        &pool,
        CreateArtist {
            publisher_id: publisher.id,
            name: "Artist".to_string(),
            bio: None,
            birth_date: None,
            country: None,
        },
    )
    .await
    .unwrap();

    let album = albums::create(
        &pool,
        CreateAlbum {
            artist_id: artist.id,
            title: "Album".to_string(),
            release_date: None,
            cover_path: None,
        },
    )
    .await
    .unwrap();

    let song = songs::create(&pool, song_under(Some(album.id), "Song")).await.unwrap();

    assert!(artists::delete(&pool, artist.id).await.unwrap());

    assert!(artists::get_by_id(&pool, artist.id).await.unwrap().is_none());
    assert!(albums::get_by_id(&pool, album.id).await.unwrap().is_none());
    assert!(songs::get_by_id(&pool, song.id).await.unwrap().is_none());
}

#[tokio::test]
async fn deleting_album_cascades_to_songs_only() {
    let pool = test_pool().await;
    let publisher = seed_publisher(&pool).await;

    let artist = artists::create(
        &pool,
        CreateArtist {
            publisher_id: publisher.id,
            name: "Artist".to_string(),
            bio: None,
            birth_date: None,
            country: None,
        },
    )
    .await
    .unwrap();

    let album = albums::create(
        &pool,
        CreateAlbum {
            artist_id: artist.id,
            title: "Album".to_string(),
            release_date: None,
            cover_path: None,
        },
    )
    .await
    .unwrap();

    let song = songs::create(&pool, song_under(Some(album.id), "Song")).await.unwrap();

    assert!(albums::delete(&pool, album.id).await.unwrap());

    assert!(songs::get_by_id(&pool, song.id).await.unwrap().is_none());
    // The parent artist is untouched
    assert!(artists::get_by_id(&pool, artist.id).await.unwrap().is_some());
}

#[tokio::test]
async fn delete_missing_entity_reports_nothing_deleted() {
    let pool = test_pool().await;

    assert!(!artists::delete(&pool, 999).await.unwrap());
    assert!(!albums::delete(&pool, 999).await.unwrap());
    assert!(!songs::delete(&pool, 999).await.unwrap());
}
