mod remove_files;
