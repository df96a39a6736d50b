use crate::models::DashboardResponse;

pub fn render_index(dashboard: &DashboardResponse) -> String {
    let state = serde_json::to_string(dashboard)
        .unwrap_or_else(|_| "null".to_string())
        .replace("</", "<\\/");
    let theme_class = match dashboard.theme {
        Some(theme) => theme.as_str(),
        None => "",
    };
    INDEX_HTML
        .replace("{{TODAY}}", &dashboard.today.to_string())
        .replace("{{CURRENT_DATE}}", &dashboard.current_date.to_string())
        .replace("{{THEME}}", theme_class)
        .replace("{{STATE}}", &state)
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>HabEight</title>
  <style>
    :root {
      --bg: #f6f4ef;
      --ink: #2b2a28;
      --muted: #8b857d;
      --card: #ffffff;
      --cell: #ebedf0;
      --accent: #2f4858;
    }

    body.dark {
      --bg: #161b22;
      --ink: #e6edf3;
      --muted: #8b949e;
      --card: #0d1117;
      --cell: #21262d;
      --accent: #58a6ff;
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: var(--bg);
      color: var(--ink);
      font-family: "Trebuchet MS", sans-serif;
      display: grid;
      place-items: center;
      padding: 32px 18px;
    }

    .app {
      width: min(720px, 100%);
      background: var(--card);
      border-radius: 24px;
      padding: 32px;
      display: grid;
      gap: 24px;
      box-shadow: 0 20px 48px rgba(0, 0, 0, 0.12);
    }

    header {
      display: flex;
      justify-content: space-between;
      align-items: center;
    }

    h1 {
      margin: 0;
      font-size: 2rem;
    }

    .date-nav {
      display: flex;
      gap: 8px;
      align-items: center;
    }

    button {
      border: none;
      border-radius: 999px;
      padding: 8px 14px;
      cursor: pointer;
      background: var(--accent);
      color: white;
      font-weight: 600;
    }

    button:disabled {
      opacity: 0.4;
      cursor: default;
    }

    #habit-list {
      list-style: none;
      padding: 0;
      margin: 0;
      display: grid;
      gap: 8px;
    }

    #habit-list li {
      display: flex;
      align-items: center;
      gap: 10px;
    }

    #habit-list .delete {
      margin-left: auto;
      background: transparent;
      color: var(--muted);
    }

    .squares {
      list-style: none;
      padding: 0;
      margin: 0;
      display: grid;
      grid-template-rows: repeat(7, 12px);
      grid-auto-flow: column;
      grid-auto-columns: 12px;
      gap: 3px;
    }

    .squares li {
      border-radius: 2px;
      background: var(--cell);
      cursor: pointer;
    }

    .graph-btns {
      display: flex;
      gap: 6px;
    }

    .graph-btns button {
      width: 22px;
      height: 22px;
      padding: 0;
    }

    .meta {
      color: var(--muted);
    }

    #snackbar {
      position: fixed;
      right: 24px;
      bottom: 24px;
      padding: 12px 18px;
      border-radius: 12px;
      background: var(--ink);
      color: var(--bg);
      visibility: hidden;
    }

    #snackbar.show {
      visibility: visible;
    }
  </style>
</head>
<body class="{{THEME}}">
  <main class="app">
    <header>
      <h1>HabEight</h1>
      <button id="toggle-theme-btn" type="button">Theme</button>
    </header>

    <section class="date-nav">
      <button id="prev-date-btn" type="button">&larr;</button>
      <input id="date-displaying" type="date" value="{{CURRENT_DATE}}" max="{{TODAY}}" />
      <button id="next-date-btn" type="button">&rarr;</button>
      <button id="today-btn" type="button">Today</button>
    </section>

    <section>
      <ul id="habit-list"></ul>
      <form id="input-habit">
        <input id="habit-to-add" type="text" placeholder="New habit" />
        <button id="add-habit-button" type="submit">Add</button>
      </form>
      <p id="limit-warning" class="meta" hidden>Habit limit reached.</p>
    </section>

    <section>
      <div class="graph-btns" id="graph-btns"></div>
      <p class="meta"><span id="display-streak">Current Streak: N/A</span> &middot; <span id="days-tracked">0 days</span></p>
      <ul class="squares" id="squares"></ul>
    </section>
  </main>
  <div id="snackbar"></div>

  <script>
    const habitList = document.getElementById('habit-list');
    const dateInput = document.getElementById('date-displaying');
    const nextBtn = document.getElementById('next-date-btn');
    const prevBtn = document.getElementById('prev-date-btn');
    const addForm = document.getElementById('input-habit');
    const habitInput = document.getElementById('habit-to-add');
    const limitWarning = document.getElementById('limit-warning');
    const graphBtns = document.getElementById('graph-btns');
    const streakEl = document.getElementById('display-streak');
    const daysEl = document.getElementById('days-tracked');
    const squares = document.getElementById('squares');
    const snackbar = document.getElementById('snackbar');

    let state = {{STATE}};

    const showSnackbar = (message) => {
      snackbar.textContent = message;
      snackbar.className = 'show';
      setTimeout(() => { snackbar.className = ''; }, 1750);
    };

    const send = async (method, url, body) => {
      const res = await fetch(url, {
        method,
        headers: { 'content-type': 'application/json' },
        body: body === undefined ? undefined : JSON.stringify(body)
      });
      if (!res.ok) {
        showSnackbar(await res.text());
        const refreshed = await fetch('/api/state');
        if (refreshed.ok) {
          render(await refreshed.json());
        }
        return;
      }
      render(await res.json());
    };

    const render = (next) => {
      state = next;
      dateInput.value = state.current_date;
      dateInput.min = state.earliest_date;
      nextBtn.disabled = !state.can_advance;
      prevBtn.disabled = !state.can_retreat;
      limitWarning.textContent = `Habit limit of ${state.capacity} reached.`;
      addForm.hidden = state.at_capacity;
      limitWarning.hidden = !state.at_capacity;

      habitList.innerHTML = '';
      state.habits.forEach((habit) => {
        const item = document.createElement('li');
        const box = document.createElement('input');
        box.type = 'checkbox';
        box.checked = habit.completed;
        box.style.accentColor = habit.color;
        box.addEventListener('change', () =>
          send('POST', `/api/habits/${encodeURIComponent(habit.name)}/completion`, { completed: box.checked }));
        const label = document.createElement('label');
        label.textContent = habit.name;
        const del = document.createElement('button');
        del.className = 'delete';
        del.textContent = 'delete';
        del.addEventListener('click', () =>
          send('DELETE', `/api/habits/${encodeURIComponent(habit.name)}`));
        item.append(box, label, del);
        habitList.appendChild(item);
      });

      graphBtns.innerHTML = '';
      state.habits.forEach((habit) => {
        const btn = document.createElement('button');
        btn.style.background = habit.color;
        btn.disabled = habit.index === state.selected;
        btn.addEventListener('click', () => send('POST', '/api/graph', { index: habit.index }));
        graphBtns.appendChild(btn);
      });

      streakEl.textContent = `Current Streak: ${state.streak === null ? 'N/A' : state.streak}`;
      squares.innerHTML = '';
      if (!state.heatmap) {
        daysEl.textContent = '0 days';
        return;
      }
      daysEl.textContent = `${state.heatmap.shown} days`;
      state.heatmap.cells.forEach((cell) => {
        const square = document.createElement('li');
        square.title = cell.date;
        if (cell.level > 0) {
          square.style.background = state.palette[(cell.level - 1) % state.palette.length];
        }
        square.addEventListener('click', () => send('POST', '/api/date', { date: cell.date }));
        squares.appendChild(square);
      });
    };

    prevBtn.addEventListener('click', () => send('POST', '/api/navigate', { direction: 'prev' }));
    nextBtn.addEventListener('click', () => send('POST', '/api/navigate', { direction: 'next' }));
    document.getElementById('today-btn').addEventListener('click', () =>
      send('POST', '/api/navigate', { direction: 'today' }));
    dateInput.addEventListener('change', () => send('POST', '/api/date', { date: dateInput.value }));

    addForm.addEventListener('submit', (event) => {
      event.preventDefault();
      send('POST', '/api/habits', { name: habitInput.value });
      habitInput.value = '';
    });

    document.getElementById('toggle-theme-btn').addEventListener('click', async () => {
      const systemDark = window.matchMedia('(prefers-color-scheme: dark)').matches;
      await send('POST', '/api/theme', { system_dark: systemDark });
      document.body.className = state.theme || '';
    });

    if (!state.theme && window.matchMedia('(prefers-color-scheme: dark)').matches) {
      document.body.className = 'dark';
    }
    render(state);
  </script>
</body>
</html>
"#;
