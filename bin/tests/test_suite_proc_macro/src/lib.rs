use quote::{format_ident, quote};

/// Generates one `#[test]` per `.lox` script found below `bin/tests`.
///
/// Scripts are embedded with `include_str!`, so editing one rebuilds the suite.
#[proc_macro]
pub fn generate_tests(_: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let root_dir = format!("{}/..", env!("CARGO_MANIFEST_DIR"));
    let tests = walkdir::WalkDir::new(&root_dir)
        .sort_by_file_name()
        .into_iter()
        .flatten()
        .filter(|entry| entry.path().extension() == Some("lox".as_ref()))
        .map(|entry| {
            let test_file_path = entry.path().to_string_lossy().to_string();
            let relative_test_path = entry.path().strip_prefix(&root_dir).unwrap().to_string_lossy();
            let test_ident = format_ident!(
                "lox_{}",
                relative_test_path.trim_end_matches(".lox").replace(['/', '-'], "_")
            );
            quote! {
                #[test]
                fn #test_ident() {
                    lox_expect(include_str!(#test_file_path));
                }
            }
        });

    quote! {
        #[ctor::ctor]
        fn init() {
            env_logger::init();
        }

        #(#tests)*
    }
    .into()
}
