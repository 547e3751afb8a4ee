mod session_id_test;
mod storage_path_test;
