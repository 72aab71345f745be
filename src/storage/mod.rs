pub mod cmap_file_source;
