use std::collections::HashMap;

use crate::file_tree::FileItem;

pub const DEFAULT_ACTIVE_FILE: &str = "src/App.js";

/// Shown for any path without a seeded source.
pub const DEFAULT_CONTENT: &str = "// Start coding here\n";

const SAMPLE_SOURCES: [(&str, &str); 9] = [
    (
        "src/index.js",
        r#"import React from 'react';
import ReactDOM from 'react-dom/client';
import App from './App';
import './styles/main.css';

const root = ReactDOM.createRoot(document.getElementById('root'));
root.render(<App />);
"#,
    ),
    (
        "src/App.js",
        r#"import React, { useState } from 'react';
import Button from './components/Button';
import Header from './components/Header';

// Root component for the demo workspace
function App() {
  const [count, setCount] = useState(0);

  const handleClick = () => {
    setCount(count + 1);
  };

  return (
    <div className="app">
      <Header title="Mock Editor" />
      <p>You clicked {count} times</p>
      <Button onClick={handleClick} label="Click me" />
    </div>
  );
}

export default App;
"#,
    ),
    (
        "src/components/Button.js",
        r#"import React from 'react';

/* Reusable button with a label */
function Button({ onClick, label }) {
  return (
    <button className="btn" onClick={onClick}>
      {label}
    </button>
  );
}

export default Button;
"#,
    ),
    (
        "src/components/Header.tsx",
        r#"import React from 'react';

interface HeaderProps {
  title: string;
  subtitle?: string;
}

export function Header({ title, subtitle }: HeaderProps) {
  const upper: string = title.toUpperCase();
  return (
    <header>
      <h1>{upper}</h1>
      {subtitle && <h2>{subtitle}</h2>}
    </header>
  );
}

export default Header;
"#,
    ),
    (
        "src/styles/main.css",
        r#"/* Global styles */
body {
  margin: 0;
  font-family: sans-serif;
}

.app {
  padding: 16px;
}

.btn {
  background: #007acc;
  color: white;
  border: none;
}
"#,
    ),
    (
        "src/utils/helpers.ts",
        r#"// Small formatting helpers
export function formatDate(date: Date): string {
  return date.toISOString().slice(0, 10);
}

export function clamp(value: number, min: number, max: number): number {
  return Math.min(Math.max(value, min), max);
}
"#,
    ),
    (
        "public/index.html",
        r#"<!DOCTYPE html>
<html lang="en">
  <head>
    <meta charset="utf-8" />
    <title>Mock Editor</title>
  </head>
  <body>
    <div id="root"></div>
  </body>
</html>
"#,
    ),
    (
        "package.json",
        r#"{
  "name": "mock-editor-demo",
  "version": "1.0.0",
  "scripts": {
    "start": "react-scripts start",
    "build": "react-scripts build"
  },
  "dependencies": {
    "react": "^18.2.0",
    "react-dom": "^18.2.0"
  }
}
"#,
    ),
    (
        "README.md",
        r#"# Mock Editor Demo

A tiny React project used to populate the explorer.

Run `npm start` to launch the dev server.
"#,
    ),
];

pub fn sample_tree() -> Vec<FileItem> {
    vec![
        FileItem::folder(
            "src",
            vec![
                FileItem::file("index.js"),
                FileItem::file("App.js"),
                FileItem::folder(
                    "components",
                    vec![FileItem::file("Button.js"), FileItem::file("Header.tsx")],
                ),
                FileItem::folder("styles", vec![FileItem::file("main.css")]),
                FileItem::folder("utils", vec![FileItem::file("helpers.ts")]),
            ],
        ),
        FileItem::folder("public", vec![FileItem::file("index.html")]),
        FileItem::file("package.json"),
        FileItem::file("README.md"),
    ]
}

pub fn sample_contents() -> HashMap<String, String> {
    SAMPLE_SOURCES
        .iter()
        .map(|(path, source)| (path.to_string(), source.to_string()))
        .collect()
}

/// Seeded source for `path`, or the default content.
pub fn sample_source(path: &str) -> &'static str {
    SAMPLE_SOURCES
        .iter()
        .find(|(candidate, _)| *candidate == path)
        .map(|(_, source)| *source)
        .unwrap_or(DEFAULT_CONTENT)
}
