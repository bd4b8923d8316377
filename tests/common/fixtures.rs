//! Reusable test content

/// Settings pointing at `packages/` and `inventory.toml` in the workspace
pub const SETTINGS: &str = r#"
package_dir = "packages"
inventory = "inventory.toml"
file_ignores = '(~$)|(\.svn)'
"#;

/// Two computers and a group
pub const INVENTORY: &str = r#"
[computers.web1]
ip = "10.0.0.5"
domain = "example.com"

[computers.db1]
ip = "10.0.0.9"

[groups.web]
computers = ["web1"]
"#;

/// A small web package exercising templates, overrides and deletions
pub const WEB_PACKAGE: &[(&str, &str)] = &[
    ("web/etc/fck_metadata.txt", ".:root:root:755\nmotd:root:adm:640\n"),
    ("web/etc/fck_delete.txt", "old.conf\n"),
    ("web/etc/motd", "welcome\n"),
    ("web/etc/motd~", "editor backup\n"),
    (
        "web/etc/hosts.tmplt",
        "{{ computer.ip }} {{ computer.name }}.{{ computer.domain }}\n",
    ),
    ("web/etc/nginx/nginx.conf", "worker_processes 1;\n"),
    ("web/srv/app/fck_metadata.txt", ".:svc:svc:750\n"),
    ("web/srv/app/run.sh", "#!/bin/sh\nexec app\n"),
];
