pub mod episode_slug;
