//! Usage examples appended to each command's help, rendered with the running
//! executable's name.

fn render(executable: &str, entries: &[(&str, &str)]) -> String {
    let mut text = String::from("Examples:\n");
    for (index, (comment, args)) in entries.iter().enumerate() {
        if index > 0 {
            text.push('\n');
        }
        text.push_str(&format!("  # {comment}\n  {executable} {args}\n"));
    }
    text
}

pub fn ecdsa(executable: &str) -> String {
    render(
        executable,
        &[
            ("General command usage", "ecdsa --file \"test.pem\""),
            ("Full system path target file", "ecdsa --file \"/tmp/test.pem\""),
            (
                "Generate a directory if it doesn't exist",
                "ecdsa --mkdir --file \"./example/test.pem\"",
            ),
            (
                "Base64-encode the keys' contents and write to file",
                "ecdsa --b64 --file \"base64-encoded-key.pem\"",
            ),
            ("Print both keys to standard-output (dry-run)", "ecdsa --dry-run"),
        ],
    )
}

pub fn update_build(executable: &str) -> String {
    render(
        executable,
        &[
            (
                "General command usage",
                "kubernetes kustomization update build --file ./kustomization.yaml --build 1.0.0",
            ),
            (
                "With verbose logging",
                "kubernetes kustomization update build --verbosity trace --file ./kustomization.yaml --build 1.0.0",
            ),
            (
                "Only write content to standard-output (dry-run)",
                "kubernetes kustomization update build --file ./kustomization.yaml --build 1.0.0 --dry-run",
            ),
        ],
    )
}

pub fn update_image(executable: &str) -> String {
    render(
        executable,
        &[
            (
                "General command usage",
                "kubernetes kustomization update image --file ./kustomization.yaml --image service:latest --name example --tag 1.0.0 --registry private.registry.io",
            ),
            (
                "With verbose logging",
                "kubernetes kustomization update image --verbosity trace --file ./kustomization.yaml --image service:latest --name example --tag 1.0.0 --registry private.registry.io",
            ),
            (
                "Only write content to standard-output (dry-run), as json",
                "kubernetes kustomization update image --file ./kustomization.yaml --image service:latest --name example --tag 1.0.0 --dry-run --output json",
            ),
        ],
    )
}

pub fn token(executable: &str) -> String {
    render(
        executable,
        &[
            ("General command usage", "random token"),
            ("Custom token length", "random token --length 64"),
        ],
    )
}
