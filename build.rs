use std::env;
use std::fs;
use std::path::Path;

/// Windowsビルド用: 同梱OpenCVのDLLを実行ファイルの隣へコピーする。
/// third_party/opencv が存在しない環境（システムのOpenCVを使う場合）では
/// 警告のみで何もしない。
fn main() {
    let manifest_dir = env::var("CARGO_MANIFEST_DIR").unwrap();
    let opencv_bin_dir = Path::new(&manifest_dir)
        .join("third_party")
        .join("opencv")
        .join("build")
        .join("x64")
        .join("vc16")
        .join("bin");

    if !opencv_bin_dir.exists() {
        println!(
            "cargo:warning=OpenCV DLL directory not found (using system OpenCV): {}",
            opencv_bin_dir.display()
        );
        return;
    }

    // ビルドプロファイルに応じた出力ディレクトリを決定
    // OUT_DIR は target/<profile>/build/<pkg>/out なので3階層上がtarget/<profile>
    let out_dir = env::var("OUT_DIR").unwrap();
    let target_dir = Path::new(&out_dir).ancestors().nth(3).unwrap();

    copy_opencv_dlls(&opencv_bin_dir, target_dir);

    println!("cargo:rerun-if-changed=third_party/opencv/build/x64/vc16/bin");
}

fn copy_opencv_dlls(src_dir: &Path, dst_dir: &Path) {
    let entries = match fs::read_dir(src_dir) {
        Ok(entries) => entries,
        Err(e) => {
            println!("cargo:warning=Failed to read OpenCV DLL directory: {}", e);
            return;
        }
    };

    for entry in entries.flatten() {
        let path = entry.path();
        let Some(filename) = path.file_name() else {
            continue;
        };
        let filename_str = filename.to_string_lossy();

        if !filename_str.ends_with(".dll") || !filename_str.starts_with("opencv") {
            continue;
        }

        let dst_path = dst_dir.join(filename);

        // すでに同じサイズの同名ファイルが存在する場合はスキップ
        if dst_path.exists() {
            if let (Ok(src_meta), Ok(dst_meta)) = (fs::metadata(&path), fs::metadata(&dst_path)) {
                if src_meta.len() == dst_meta.len() {
                    continue;
                }
            }
        }

        if let Err(e) = fs::copy(&path, &dst_path) {
            println!("cargo:warning=Failed to copy DLL {}: {}", filename_str, e);
        }
    }
}
