use std::{
    env::{split_paths, var_os},
    fs,
    path::{Path, PathBuf},
    process::Command,
};

pub use find_cuda_helper::{find_cuda_root, include_cuda};

/// Returns `true` if cuBLAS can be linked, from the toolkit or from the loader paths.
pub fn find_cublas(cuda_root: impl AsRef<Path>) -> bool {
    let root = cuda_root.as_ref();
    if !root.join("include/cublas_v2.h").is_file() {
        return false;
    }
    if ["lib64", "lib", "lib/x64"]
        .iter()
        .any(|dir| root.join(dir).join(LIB).is_file())
    {
        return true;
    }
    in_ldconfig() || in_library_path()
}

const LIB: &str = if cfg!(windows) {
    "cublas.lib"
} else {
    "libcublas.so"
};

fn in_ldconfig() -> bool {
    if !cfg!(target_os = "linux") {
        return false;
    }
    Command::new("ldconfig")
        .arg("-p")
        .output()
        .is_ok_and(|output| String::from_utf8_lossy(&output.stdout).contains(LIB))
}

fn in_library_path() -> bool {
    ["LIBRARY_PATH", "LD_LIBRARY_PATH"]
        .into_iter()
        .filter_map(var_os)
        .flat_map(|paths| split_paths(&paths).collect::<Vec<PathBuf>>())
        .filter_map(|path| fs::read_dir(path).ok())
        .flatten()
        .filter_map(|result| result.ok())
        .any(|entry| entry.file_name() == LIB)
}

#[test]
fn test_find() {
    let Some(root) = find_cuda_root() else {
        println!("cuda not exist");
        return;
    };
    println!("cuda root = {}", root.display());
    println!("cublas found: {}", find_cublas(&root))
}
